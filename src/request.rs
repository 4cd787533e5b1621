//! Parameter parsing and validation in front of the ledger and series builder.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::errors::RequestError;
use crate::ledger::ViewKind;
use crate::series::BudgetQuery;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Four-digit calendar years only; chrono's `%Y` also takes signed extended years.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// How strictly `spending` and `date` are required.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestMode {
    /// `budget`, `spending` and `date` are all required.
    #[default]
    Strict,
    /// Only `budget` is required; `date` defaults to today and `spending` may be omitted.
    Lenient,
}

impl FromStr for RequestMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(RequestMode::Strict),
            "lenient" => Ok(RequestMode::Lenient),
            other => Err(format!("unknown request mode `{other}`")),
        }
    }
}

impl fmt::Display for RequestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestMode::Strict => write!(f, "strict"),
            RequestMode::Lenient => write!(f, "lenient"),
        }
    }
}

/// Raw, unvalidated request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetParams {
    pub budget: Option<String>,
    pub spending: Option<String>,
    pub date: Option<String>,
    pub view: Option<String>,
}

impl BudgetParams {
    /// Parses `key=value` tokens. A token may itself be a query string joined by `&`.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, RequestError> {
        let mut params = Self::default();
        for arg in args {
            params.absorb(arg.as_ref())?;
        }
        Ok(params)
    }

    /// Parses a URL query string such as `/budget_plot?budget=1000&view=week`,
    /// decoding percent escapes and `+` in keys and values.
    pub fn from_query(query: &str) -> Result<Self, RequestError> {
        let mut params = Self::default();
        params.absorb(query)?;
        Ok(params)
    }

    fn absorb(&mut self, raw: &str) -> Result<(), RequestError> {
        let query = match raw.split_once('?') {
            Some((_, rest)) => rest,
            None => raw,
        };
        for pair in query.split('&').filter(|pair| !pair.trim().is_empty()) {
            if !pair.contains('=') {
                return Err(RequestError::Malformed(pair.to_string()));
            }
            // Percent escapes and `+` decode the same way a browser form encodes them.
            let Some((key, value)) = form_urlencoded::parse(pair.as_bytes()).next() else {
                continue;
            };
            let value = value.trim();
            let slot = match key.trim().to_ascii_lowercase().as_str() {
                "budget" => &mut self.budget,
                "spending" => &mut self.spending,
                "date" => &mut self.date,
                "view" => &mut self.view,
                _ => {
                    tracing::debug!(key = %key, "ignoring unknown parameter");
                    continue;
                }
            };
            *slot = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            };
        }
        Ok(())
    }
}

/// A validated request: the query to build plus the spending to record, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetRequest {
    pub query: BudgetQuery,
    pub spending: Option<f64>,
}

impl BudgetRequest {
    /// Validates raw parameters. Nothing here touches the ledger.
    pub fn validate(
        params: &BudgetParams,
        mode: RequestMode,
        today: NaiveDate,
    ) -> Result<Self, RequestError> {
        let budget = params
            .budget
            .as_deref()
            .ok_or(RequestError::MissingParameter("budget"))?;
        let budget = parse_amount("budget", budget)?;
        if budget <= 0.0 {
            return Err(RequestError::OutOfRange {
                name: "budget",
                value: budget,
            });
        }

        let spending = match (params.spending.as_deref(), mode) {
            (Some(raw), _) => Some(parse_amount("spending", raw)?),
            (None, RequestMode::Strict) => {
                return Err(RequestError::MissingParameter("spending"))
            }
            (None, RequestMode::Lenient) => None,
        };
        if let Some(value) = spending {
            if value < 0.0 {
                return Err(RequestError::OutOfRange {
                    name: "spending",
                    value,
                });
            }
        }

        let focus_date = match (params.date.as_deref(), mode) {
            (Some(raw), _) => parse_date(raw)?,
            (None, RequestMode::Strict) => return Err(RequestError::MissingParameter("date")),
            (None, RequestMode::Lenient) => today,
        };

        let view = ViewKind::from_param_lenient(params.view.as_deref());

        Ok(Self {
            query: BudgetQuery::new(budget, focus_date, view),
            spending,
        })
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, RequestError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .ok()
        .filter(|date| YEAR_RANGE.contains(&date.year()))
        .ok_or_else(|| RequestError::InvalidDateFormat(raw.to_string()))
}

pub fn parse_amount(name: &'static str, raw: &str) -> Result<f64, RequestError> {
    let value: f64 = raw.trim().parse().map_err(|_| RequestError::InvalidNumber {
        name,
        raw: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(RequestError::NonFinite(name));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()
    }

    #[test]
    fn query_string_with_path_is_accepted() {
        let params =
            BudgetParams::from_query("/budget_plot?budget=1000&spending=200&date=2025-11-05")
                .unwrap();
        assert_eq!(params.budget.as_deref(), Some("1000"));
        assert_eq!(params.spending.as_deref(), Some("200"));
        assert_eq!(params.date.as_deref(), Some("2025-11-05"));
        assert_eq!(params.view, None);
    }

    #[test]
    fn query_values_are_percent_decoded() {
        let params =
            BudgetParams::from_query("?budget=1%2C000&date=2025%2D11%2D05&view=+week+").unwrap();
        assert_eq!(params.budget.as_deref(), Some("1,000"));
        assert_eq!(params.date.as_deref(), Some("2025-11-05"));
        assert_eq!(params.view.as_deref(), Some("week"));
        assert_eq!(
            parse_date(params.date.as_deref().unwrap()),
            Ok(NaiveDate::from_ymd_opt(2025, 11, 5).unwrap())
        );
    }

    #[test]
    fn later_tokens_override_earlier_ones() {
        let params = BudgetParams::from_args(&["view=week", "budget=10", "view=month"]).unwrap();
        assert_eq!(params.view.as_deref(), Some("month"));
    }

    #[test]
    fn token_without_equals_is_malformed() {
        let err = BudgetParams::from_args(&["budget"]).unwrap_err();
        assert_eq!(err, RequestError::Malformed("budget".into()));
    }

    #[test]
    fn strict_mode_requires_spending_then_date() {
        let mut params = BudgetParams::from_args(&["budget=100"]).unwrap();
        assert_eq!(
            BudgetRequest::validate(&params, RequestMode::Strict, today()),
            Err(RequestError::MissingParameter("spending"))
        );
        params.spending = Some("5".into());
        assert_eq!(
            BudgetRequest::validate(&params, RequestMode::Strict, today()),
            Err(RequestError::MissingParameter("date"))
        );
    }

    #[test]
    fn lenient_mode_defaults_date_to_today() {
        let params = BudgetParams::from_args(&["budget=100"]).unwrap();
        let request = BudgetRequest::validate(&params, RequestMode::Lenient, today()).unwrap();
        assert_eq!(request.query.focus_date, today());
        assert_eq!(request.spending, None);
        assert_eq!(request.query.view, ViewKind::Month);
    }

    #[test]
    fn non_finite_and_negative_amounts_are_rejected() {
        assert_eq!(
            parse_amount("spending", "NaN"),
            Err(RequestError::NonFinite("spending"))
        );
        assert_eq!(
            parse_amount("budget", "inf"),
            Err(RequestError::NonFinite("budget"))
        );
        let params =
            BudgetParams::from_args(&["budget=100", "spending=-1", "date=2025-11-05"]).unwrap();
        assert!(matches!(
            BudgetRequest::validate(&params, RequestMode::Strict, today()),
            Err(RequestError::OutOfRange {
                name: "spending",
                ..
            })
        ));
    }

    #[test]
    fn dates_outside_four_digit_years_are_rejected() {
        for raw in ["+262142-12-31", "-262143-01-01", "0000-12-31", "+10000-01-01"] {
            assert_eq!(
                parse_date(raw),
                Err(RequestError::InvalidDateFormat(raw.into())),
                "{raw}"
            );
        }
        assert_eq!(
            parse_date("0001-01-01"),
            Ok(NaiveDate::from_ymd_opt(1, 1, 1).unwrap())
        );
        assert_eq!(
            parse_date("9999-12-31"),
            Ok(NaiveDate::from_ymd_opt(9999, 12, 31).unwrap())
        );
    }

    #[test]
    fn mode_round_trips_through_display() {
        for mode in [RequestMode::Strict, RequestMode::Lenient] {
            assert_eq!(mode.to_string().parse::<RequestMode>(), Ok(mode));
        }
    }
}
