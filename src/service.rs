use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::chart::PlotSpec;
use crate::errors::RequestError;
use crate::ledger::LedgerStore;
use crate::request::{BudgetParams, BudgetRequest, RequestMode};
use crate::series::{self, BudgetQuery, BudgetSeries};

/// A computed view ready to hand to a renderer.
#[derive(Debug, Clone)]
pub struct BudgetView {
    pub series: BudgetSeries,
    pub plot: PlotSpec,
}

/// Request entry point: validates, records spending, and builds the series.
#[derive(Clone)]
pub struct BudgetViewService {
    ledger: Arc<dyn LedgerStore>,
    mode: RequestMode,
}

impl BudgetViewService {
    pub fn new(ledger: Arc<dyn LedgerStore>, mode: RequestMode) -> Self {
        Self { ledger, mode }
    }

    pub fn ledger(&self) -> &Arc<dyn LedgerStore> {
        &self.ledger
    }

    pub fn mode(&self) -> RequestMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RequestMode) {
        self.mode = mode;
    }

    /// Full request flow. Validation failures leave the ledger untouched.
    pub fn handle(
        &self,
        params: &BudgetParams,
        today: NaiveDate,
    ) -> Result<BudgetView, RequestError> {
        let request = BudgetRequest::validate(params, self.mode, today)?;
        if let Some(amount) = request.spending {
            self.record(request.query.focus_date, amount);
        }
        Ok(self.view(&request.query))
    }

    pub fn record(&self, day: NaiveDate, amount: f64) {
        self.ledger.upsert(day, amount);
        info!(%day, amount, "spending recorded");
    }

    /// Builds the view for `query` from the current ledger state without mutating it.
    pub fn view(&self, query: &BudgetQuery) -> BudgetView {
        let series = series::build(query, self.ledger.as_ref());
        let plot = PlotSpec::for_series(&series);
        info!(
            focus = %query.focus_date,
            view = %query.view,
            days = series.window.len_days(),
            "budget view built"
        );
        BudgetView { series, plot }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::InMemoryLedger;
    use crate::series::SeriesKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service(mode: RequestMode) -> BudgetViewService {
        BudgetViewService::new(Arc::new(InMemoryLedger::new()), mode)
    }

    #[test]
    fn handle_records_spending_before_building() {
        let service = service(RequestMode::Strict);
        let params =
            BudgetParams::from_args(&["budget=1000", "spending=200", "date=2025-11-05"]).unwrap();
        let view = service.handle(&params, date(2025, 11, 20)).unwrap();

        assert_eq!(service.ledger().get(date(2025, 11, 5)), 200.0);
        assert_eq!(
            view.series
                .amount_on(date(2025, 11, 5), SeriesKind::RemainingBudget),
            Some(800.0)
        );
        assert_eq!(view.plot.y_max, 1100.0);
    }

    #[test]
    fn rejected_request_does_not_touch_ledger() {
        let service = service(RequestMode::Strict);
        let params =
            BudgetParams::from_args(&["budget=1000", "spending=200", "date=2025/11/05"]).unwrap();
        let err = service.handle(&params, date(2025, 11, 20)).unwrap_err();

        assert_eq!(err, RequestError::InvalidDateFormat("2025/11/05".into()));
        assert!(service.ledger().is_empty());
    }

    #[test]
    fn extended_year_dates_are_rejected_before_recording() {
        let service = service(RequestMode::Strict);
        for raw in ["+262142-12-31", "-262143-01-01"] {
            let params = BudgetParams {
                budget: Some("10".into()),
                spending: Some("1".into()),
                date: Some(raw.into()),
                view: Some("week".into()),
            };
            let err = service.handle(&params, date(2025, 11, 20)).unwrap_err();
            assert_eq!(err, RequestError::InvalidDateFormat(raw.into()));
        }
        assert!(service.ledger().is_empty());
    }

    #[test]
    fn lenient_request_without_spending_only_reads() {
        let service = service(RequestMode::Lenient);
        service.record(date(2025, 11, 2), 25.0);
        let params = BudgetParams::from_args(&["budget=100"]).unwrap();
        let view = service.handle(&params, date(2025, 11, 20)).unwrap();

        assert_eq!(service.ledger().len(), 1);
        assert_eq!(
            view.series
                .amount_on(date(2025, 11, 20), SeriesKind::RemainingBudget),
            Some(75.0)
        );
    }
}
