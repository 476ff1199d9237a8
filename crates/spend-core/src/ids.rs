//! Timestamp-derived expense identifiers.

use chrono::{DateTime, Utc};
use spend_domain::ExpenseEntry;

/// Issues expense ids from millisecond timestamps.
///
/// Ids are strictly increasing per generator and never collide with a numeric
/// id already present in the month they are issued for, even when several
/// expenses are created within the same millisecond.
#[derive(Debug, Clone, Default)]
pub struct ExpenseIdGenerator {
    last_issued: Option<i64>,
}

impl ExpenseIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, now: DateTime<Utc>, existing: &[ExpenseEntry]) -> String {
        let floor = existing
            .iter()
            .filter_map(|entry| entry.id.parse::<i64>().ok())
            .chain(self.last_issued)
            .max();
        let candidate = now.timestamp_millis();
        let id = match floor {
            Some(floor) if candidate <= floor => floor.saturating_add(1),
            _ => candidate,
        };
        self.last_issued = Some(id);
        id.to_string()
    }
}
