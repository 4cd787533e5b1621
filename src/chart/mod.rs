//! Plot descriptions and the renderers that turn a budget view into output.

pub mod json;
pub mod table;
pub mod text;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::series::{BudgetSeries, SeriesKind};

pub use json::JsonChartRenderer;
pub use text::{TextChartOptions, TextChartRenderer};

/// One plotted line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesLine {
    pub kind: SeriesKind,
    pub label: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// Everything a renderer needs: titles, axis bounds, and one line per series kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub y_min: f64,
    pub y_max: f64,
    pub lines: Vec<SeriesLine>,
}

impl PlotSpec {
    /// Lower bound sits at `-budget` so depletion stays legible next to spending
    /// spikes; the upper bound leaves 10% headroom over the largest value.
    pub fn for_series(series: &BudgetSeries) -> Self {
        let budget = series.query.monthly_budget;
        let peak = budget
            .max(series.max_daily_spending)
            .max(series.max_remaining_budget);

        let lines = [SeriesKind::DailySpending, SeriesKind::RemainingBudget]
            .into_iter()
            .map(|kind| SeriesLine {
                kind,
                label: kind.label().to_string(),
                points: series
                    .series(kind)
                    .map(|point| (point.date, point.amount))
                    .collect(),
            })
            .collect();

        Self {
            title: format!(
                "{} Budget View (Budget = {})",
                series.query.view.label(),
                budget
            ),
            x_label: "Date".into(),
            y_label: "Amount".into(),
            y_min: -budget,
            y_max: peak * 11.0 / 10.0,
            lines,
        }
    }

    pub fn line(&self, kind: SeriesKind) -> Option<&SeriesLine> {
        self.lines.iter().find(|line| line.kind == kind)
    }
}

/// Turns a computed view into some output representation.
pub trait ChartRenderer {
    type Output;
    type Error;

    fn render(&self, series: &BudgetSeries, plot: &PlotSpec) -> Result<Self::Output, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{InMemoryLedger, LedgerStore, ViewKind};
    use crate::series::{build, BudgetQuery};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn spending_spike_raises_upper_bound() {
        let ledger = InMemoryLedger::new();
        ledger.upsert(date(2025, 11, 5), 600.0);
        let series = build(
            &BudgetQuery::new(500.0, date(2025, 11, 5), ViewKind::Month),
            &ledger,
        );
        let plot = PlotSpec::for_series(&series);

        assert_eq!(plot.y_min, -500.0);
        assert_eq!(plot.y_max, 660.0);
        assert_eq!(plot.title, "Monthly Budget View (Budget = 500)");
    }

    #[test]
    fn one_line_per_kind_covering_the_window() {
        let ledger = InMemoryLedger::new();
        let series = build(
            &BudgetQuery::new(80.0, date(2025, 12, 15), ViewKind::Week),
            &ledger,
        );
        let plot = PlotSpec::for_series(&series);

        assert_eq!(plot.lines.len(), 2);
        let remaining = plot.line(SeriesKind::RemainingBudget).unwrap();
        assert_eq!(remaining.points.len(), 7);
        assert_eq!(remaining.points[0], (date(2025, 12, 15), 80.0));
        assert!(plot.title.starts_with("Weekly"));
    }
}
