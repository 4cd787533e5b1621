use std::sync::Arc;
use std::thread;

use budget_view::{build, BudgetQuery, InMemoryLedger, LedgerStore, SeriesKind, ViewKind};
use chrono::{Duration, NaiveDate};

fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn last_write_wins_for_a_day() {
    let ledger = InMemoryLedger::new();
    let day = sample_date(2025, 11, 5);
    ledger.upsert(day, 10.0);
    ledger.upsert(day, 20.0);
    assert_eq!(ledger.get(day), 20.0);
}

#[test]
fn concurrent_upserts_to_distinct_days_are_all_kept() {
    let ledger = Arc::new(InMemoryLedger::new());
    let start = sample_date(2025, 1, 1);

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || {
                for offset in (worker..365).step_by(8) {
                    ledger.upsert(start + Duration::days(offset), offset as f64);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    assert_eq!(ledger.len(), 365);
    for offset in [0_i64, 17, 180, 364] {
        assert_eq!(ledger.get(start + Duration::days(offset)), offset as f64);
    }
}

#[test]
fn concurrent_writes_to_one_day_leave_a_whole_value() {
    let ledger = Arc::new(InMemoryLedger::new());
    let day = sample_date(2025, 11, 5);

    thread::scope(|scope| {
        for worker in 0..4 {
            let ledger = &ledger;
            scope.spawn(move || {
                for _ in 0..500 {
                    ledger.upsert(day, (worker + 1) as f64 * 100.0);
                }
            });
        }
        scope.spawn(|| {
            for _ in 0..500 {
                let seen = ledger.get(day);
                assert!([0.0, 100.0, 200.0, 300.0, 400.0].contains(&seen));
            }
        });
    });

    assert_eq!(ledger.len(), 1);
}

#[test]
fn builder_accepts_shared_trait_object() {
    let ledger: Arc<dyn LedgerStore> = Arc::new(InMemoryLedger::new());
    ledger.upsert(sample_date(2025, 11, 5), 25.0);

    let series = build(
        &BudgetQuery::new(100.0, sample_date(2025, 11, 5), ViewKind::Week),
        ledger.as_ref(),
    );
    assert_eq!(
        series.amount_on(sample_date(2025, 11, 5), SeriesKind::RemainingBudget),
        Some(75.0)
    );
}
