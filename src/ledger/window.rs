use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Which span of days a budget view displays.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Week,
    #[default]
    Month,
}

impl ViewKind {
    /// Resolves a raw `view` value, falling back to `Month` for anything unrecognized.
    pub fn from_param_lenient(raw: Option<&str>) -> Self {
        match raw {
            None => ViewKind::Month,
            Some(value) => value.parse().unwrap_or_else(|_| {
                tracing::warn!(view = value, "unrecognized view, defaulting to month");
                ViewKind::Month
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewKind::Week => "Weekly",
            ViewKind::Month => "Monthly",
        }
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(ViewKind::Week),
            "month" => Ok(ViewKind::Month),
            other => Err(format!("unknown view `{other}`")),
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Week => write!(f, "week"),
            ViewKind::Month => write!(f, "month"),
        }
    }
}

/// An inclusive `[start, end]` range of calendar days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        Self {
            start: month_start(date),
            end: month_end(date),
        }
    }

    /// The ISO week (Monday through Sunday) containing `date`.
    ///
    /// Saturates at chrono's representable range instead of overflowing.
    pub fn week_of(date: NaiveDate) -> Self {
        let delta = date.weekday().num_days_from_monday() as i64;
        let start = date
            .checked_sub_signed(Duration::days(delta))
            .unwrap_or(NaiveDate::MIN);
        let end = start
            .checked_add_signed(Duration::days(6))
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    pub fn for_view(view: ViewKind, focus: NaiveDate) -> Self {
        match view {
            ViewKind::Week => Self::week_of(focus),
            ViewKind::Month => Self::month_of(focus),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn len_days(&self) -> usize {
        ((self.end - self.start).num_days() + 1).max(0) as usize
    }

    /// Every day in the window, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date) + Duration::days(days_in_month(date.year(), date.month()) as i64 - 1)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(first_next)) => (first_next - first).num_days() as u32,
        // Only reachable at the edge of chrono's representable range.
        _ => 31,
    }
}
