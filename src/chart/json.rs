use serde::Serialize;

use crate::ledger::DateWindow;
use crate::series::{BudgetSeries, SeriesPoint};

use super::{ChartRenderer, PlotSpec};

#[derive(Serialize)]
struct ChartDocument<'a> {
    plot: &'a PlotSpec,
    window: DateWindow,
    max_daily_spending: f64,
    max_remaining_budget: f64,
    points: &'a [SeriesPoint],
}

/// Serializes the plot and its points as a JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonChartRenderer {
    pub pretty: bool,
}

impl ChartRenderer for JsonChartRenderer {
    type Output = String;
    type Error = serde_json::Error;

    fn render(&self, series: &BudgetSeries, plot: &PlotSpec) -> Result<String, serde_json::Error> {
        let document = ChartDocument {
            plot,
            window: series.window,
            max_daily_spending: series.max_daily_spending,
            max_remaining_budget: series.max_remaining_budget,
            points: &series.points,
        };
        if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{InMemoryLedger, ViewKind};
    use crate::series::{build, BudgetQuery};
    use chrono::NaiveDate;

    #[test]
    fn document_carries_plot_bounds_and_points() {
        let ledger = InMemoryLedger::new();
        let focus = NaiveDate::from_ymd_opt(2025, 11, 5).unwrap();
        let series = build(&BudgetQuery::new(100.0, focus, ViewKind::Week), &ledger);
        let plot = PlotSpec::for_series(&series);

        let json = JsonChartRenderer::default().render(&series, &plot).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["plot"]["y_min"], -100.0);
        assert_eq!(value["window"]["start"], "2025-11-03");
        assert_eq!(value["points"].as_array().map(Vec::len), Some(14));
        assert_eq!(value["points"][1]["kind"], "RemainingBudget");
    }
}
