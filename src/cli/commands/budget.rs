use chrono::NaiveDate;

use crate::chart::{ChartRenderer, JsonChartRenderer};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::errors::RequestError;
use crate::ledger::{month_end, DateWindow};
use crate::request::{parse_amount, parse_date, BudgetParams};
use crate::service::BudgetView;

use super::CommandDefinition;

const PARAMS_USAGE: &str = "budget=<amount> spending=<amount> date=<YYYY-MM-DD> [view=week|month]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "plot",
            "Record spending and chart the budget view",
            "plot budget=<amount> spending=<amount> date=<YYYY-MM-DD> [view=week|month]",
            cmd_plot,
        ),
        CommandDefinition::new(
            "json",
            "Record spending and print the budget view as JSON",
            "json budget=<amount> spending=<amount> date=<YYYY-MM-DD> [view=week|month]",
            cmd_json,
        ),
        CommandDefinition::new(
            "spend",
            "Record spending for a day without charting",
            "spend <YYYY-MM-DD> <amount>",
            cmd_spend,
        ),
        CommandDefinition::new(
            "ledger",
            "List recorded daily spending",
            "ledger [YYYY-MM]",
            cmd_ledger,
        ),
    ]
}

fn build_view(context: &ShellContext, args: &[&str]) -> Result<BudgetView, CommandError> {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(format!(
            "expected parameters: {PARAMS_USAGE}"
        )));
    }
    let mut params = BudgetParams::from_args(args)?;
    if params.view.is_none() {
        params.view = Some(context.config().default_view.to_string());
    }
    context
        .service()
        .handle(&params, context.today())
        .map_err(CommandError::from)
}

fn cmd_plot(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let view = build_view(context, args)?;
    let rendered = match context.text_renderer().render(&view.series, &view.plot) {
        Ok(text) => text,
        Err(never) => match never {},
    };
    println!("{rendered}");
    Ok(())
}

fn cmd_json(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let view = build_view(context, args)?;
    let renderer = JsonChartRenderer { pretty: true };
    println!("{}", renderer.render(&view.series, &view.plot)?);
    Ok(())
}

fn cmd_spend(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [date, amount] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: spend <YYYY-MM-DD> <amount>".into(),
        ));
    };
    let day = parse_date(date)?;
    let amount = parse_amount("spending", amount)?;
    if amount < 0.0 {
        return Err(RequestError::OutOfRange {
            name: "spending",
            value: amount,
        }
        .into());
    }
    context.service().record(day, amount);
    output::success(format!("Recorded {}{amount:.2} on {day}.", context.config().currency));
    Ok(())
}

fn cmd_ledger(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let window = match args.first() {
        Some(month) => parse_month(month)?,
        None => DateWindow {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        },
    };
    let entries = context
        .service()
        .ledger()
        .entries_between(window.start, window.end);

    if entries.is_empty() {
        output::info("No spending recorded.");
        return Ok(());
    }

    output::section("Ledger");
    let currency = &context.config().currency;
    let mut total = 0.0;
    for (day, amount) in &entries {
        total += amount;
        output::info(format!("  {day}  {currency}{amount:>10.2}"));
    }
    output::info(format!("  {:<10}  {currency}{total:>10.2}", "total"));
    Ok(())
}

fn parse_month(raw: &str) -> Result<DateWindow, CommandError> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d").map_err(
        |_| CommandError::InvalidArguments(format!("invalid month `{raw}`, expected YYYY-MM")),
    )?;
    Ok(DateWindow {
        start: first,
        end: month_end(first),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_month_spans_whole_month() {
        let window = parse_month("2024-02").unwrap();
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(parse_month("2024-13").is_err());
    }
}
