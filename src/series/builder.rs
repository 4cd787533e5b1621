use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::ledger::{DateWindow, LedgerStore};

use super::{BudgetQuery, BudgetSeries, SeriesKind, SeriesPoint};

/// Running spend totals for one calendar month, anchored on its first day.
///
/// The origin is always the first day of the month containing the focus date,
/// whatever window is displayed, so week figures agree with the month budget.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeTable {
    month: DateWindow,
    totals: Vec<f64>,
}

impl CumulativeTable {
    pub fn for_month(focus: NaiveDate, amounts: impl Fn(NaiveDate) -> f64) -> Self {
        let month = DateWindow::month_of(focus);
        let mut running = 0.0;
        let totals = month
            .days()
            .map(|day| {
                running += amounts(day);
                running
            })
            .collect();
        Self { month, totals }
    }

    /// Cumulative spend through `day`.
    ///
    /// Days before the month read `0.0`; days after it read the month total.
    pub fn at(&self, day: NaiveDate) -> f64 {
        if day < self.month.start {
            return 0.0;
        }
        let offset = (day - self.month.start).num_days() as usize;
        let idx = offset.min(self.totals.len().saturating_sub(1));
        self.totals.get(idx).copied().unwrap_or(0.0)
    }

    pub fn month_total(&self) -> f64 {
        self.totals.last().copied().unwrap_or(0.0)
    }
}

/// Computes the daily-spending and remaining-budget series for `query`.
///
/// Each day is read from the ledger exactly once, so a concurrent upsert can
/// never make a day's spending point disagree with its share of the cumulative total.
pub fn build<L>(query: &BudgetQuery, ledger: &L) -> BudgetSeries
where
    L: LedgerStore + ?Sized,
{
    let window = query.window();
    let month = DateWindow::month_of(query.focus_date);

    let snapshot: BTreeMap<NaiveDate, f64> = month
        .days()
        .chain(window.days().filter(|day| !month.contains(*day)))
        .map(|day| (day, ledger.get(day)))
        .collect();
    let amount = |day: NaiveDate| snapshot.get(&day).copied().unwrap_or(0.0);

    let cumulative = CumulativeTable::for_month(query.focus_date, amount);
    debug!(
        focus = %query.focus_date,
        view = %query.view,
        month_total = cumulative.month_total(),
        "cumulative table computed"
    );

    let mut points = Vec::with_capacity(window.len_days() * 2);
    let mut max_daily_spending = 0.0_f64;
    let mut max_remaining_budget = 0.0_f64;

    for day in window.days() {
        let spent = amount(day);
        let remaining = (query.monthly_budget - cumulative.at(day)).max(0.0);
        max_daily_spending = max_daily_spending.max(spent);
        max_remaining_budget = max_remaining_budget.max(remaining);

        points.push(SeriesPoint {
            date: day,
            kind: SeriesKind::DailySpending,
            amount: spent,
        });
        points.push(SeriesPoint {
            date: day,
            kind: SeriesKind::RemainingBudget,
            amount: remaining,
        });
    }

    BudgetSeries {
        query: *query,
        window,
        points,
        max_daily_spending,
        max_remaining_budget,
    }
}
