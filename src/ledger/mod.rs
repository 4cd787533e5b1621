//! Spending ledger storage and calendar window helpers.

pub mod store;
pub mod window;

pub use store::{InMemoryLedger, LedgerStore};
pub use window::{days_in_month, month_end, month_start, DateWindow, ViewKind};
