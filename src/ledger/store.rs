use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Datelike, NaiveDate};

const SHARD_COUNT: usize = 16;

/// Point-lookup store of recorded spending per calendar day.
///
/// Implementations must serialize `upsert` and `get` for the same day so that
/// the last write (in arrival order) wins and readers never observe a torn value.
/// This is the seam for swapping in a durable backend.
pub trait LedgerStore: Send + Sync {
    /// Records `amount` for `day`, replacing any previous value.
    fn upsert(&self, day: NaiveDate, amount: f64);

    /// Stored amount for `day`, or `0.0` when nothing was recorded.
    fn get(&self, day: NaiveDate) -> f64;

    /// Recorded entries within `[start, end]`, ascending by day.
    fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, f64)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime in-memory ledger.
///
/// Days are spread over independent lock shards: writes to the same day are
/// mutually exclusive, writes to days in different shards never contend.
#[derive(Debug)]
pub struct InMemoryLedger {
    shards: Vec<RwLock<HashMap<NaiveDate, f64>>>,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            shards: (0..SHARD_COUNT).map(|_| RwLock::new(HashMap::new())).collect(),
        }
    }

    fn shard_index(day: NaiveDate) -> usize {
        day.num_days_from_ce().rem_euclid(SHARD_COUNT as i32) as usize
    }

    // A poisoned shard still holds a consistent map: every mutation is a single insert.
    fn read_shard(&self, day: NaiveDate) -> RwLockReadGuard<'_, HashMap<NaiveDate, f64>> {
        self.shards[Self::shard_index(day)]
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_shard(&self, day: NaiveDate) -> RwLockWriteGuard<'_, HashMap<NaiveDate, f64>> {
        self.shards[Self::shard_index(day)]
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LedgerStore for InMemoryLedger {
    fn upsert(&self, day: NaiveDate, amount: f64) {
        let previous = self.write_shard(day).insert(day, amount);
        tracing::debug!(%day, amount, ?previous, "ledger upsert");
    }

    fn get(&self, day: NaiveDate) -> f64 {
        self.read_shard(day).get(&day).copied().unwrap_or(0.0)
    }

    fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, f64)> {
        let mut entries: Vec<(NaiveDate, f64)> = self
            .shards
            .iter()
            .flat_map(|shard| {
                let guard = shard.read().unwrap_or_else(|poisoned| poisoned.into_inner());
                guard
                    .iter()
                    .filter(|(day, _)| **day >= start && **day <= end)
                    .map(|(day, amount)| (*day, *amount))
                    .collect::<Vec<_>>()
            })
            .collect();
        entries.sort_by_key(|(day, _)| *day);
        entries
    }

    fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| {
                shard
                    .read()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .len()
            })
            .sum()
    }
}
