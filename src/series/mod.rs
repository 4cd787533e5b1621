//! Daily spending and remaining-budget series derived from the ledger.

pub mod builder;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::{DateWindow, ViewKind};

pub use builder::{build, CumulativeTable};

/// Immutable input to one series computation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BudgetQuery {
    pub monthly_budget: f64,
    pub focus_date: NaiveDate,
    pub view: ViewKind,
}

impl BudgetQuery {
    pub fn new(monthly_budget: f64, focus_date: NaiveDate, view: ViewKind) -> Self {
        Self {
            monthly_budget,
            focus_date,
            view,
        }
    }

    pub fn window(&self) -> DateWindow {
        DateWindow::for_view(self.view, self.focus_date)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeriesKind {
    DailySpending,
    RemainingBudget,
}

impl SeriesKind {
    pub fn label(&self) -> &'static str {
        match self {
            SeriesKind::DailySpending => "spending",
            SeriesKind::RemainingBudget => "remaining",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub kind: SeriesKind,
    pub amount: f64,
}

/// Output of [`build`]: the ordered points plus the extremes used for axis scaling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetSeries {
    pub query: BudgetQuery,
    pub window: DateWindow,
    pub points: Vec<SeriesPoint>,
    pub max_daily_spending: f64,
    pub max_remaining_budget: f64,
}

impl BudgetSeries {
    /// Points of one kind, in date order.
    pub fn series(&self, kind: SeriesKind) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter().filter(move |point| point.kind == kind)
    }

    pub fn amount_on(&self, date: NaiveDate, kind: SeriesKind) -> Option<f64> {
        self.points
            .iter()
            .find(|point| point.date == date && point.kind == kind)
            .map(|point| point.amount)
    }

    /// `(date, daily spending, remaining budget)` rows for table-style renderers.
    pub fn rows(&self) -> Vec<(NaiveDate, f64, f64)> {
        self.points
            .chunks(2)
            .filter_map(|pair| match pair {
                [spent, remaining] => Some((spent.date, spent.amount, remaining.amount)),
                _ => None,
            })
            .collect()
    }
}
