#![doc(test(attr(deny(warnings))))]

//! Budget View tracks daily spending against a monthly budget and derives the
//! daily-spending and remaining-budget series shown in week or month views.

pub mod chart;
pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod request;
pub mod series;
pub mod service;
pub mod utils;

use std::sync::Once;

pub use ledger::{InMemoryLedger, LedgerStore, ViewKind};
pub use series::{build, BudgetQuery, BudgetSeries, SeriesKind, SeriesPoint};
pub use service::{BudgetView, BudgetViewService};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget View tracing initialized.");
    });
}
