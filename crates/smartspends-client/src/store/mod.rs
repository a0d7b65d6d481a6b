mod ledger;

use std::collections::HashMap;

pub use ledger::{DEFAULT_WEEKLY_LIMIT, LedgerStore};

use crate::ClientResult;
use crate::analytics::types::ExpenseRecord;

/// Supplies a user's expense collection in insertion order. A user with no
/// rows gets an empty collection, not an error.
pub trait RecordSource {
    fn records(&self, user_id: &str) -> ClientResult<Vec<ExpenseRecord>>;
}

pub trait RecordWriter {
    fn append_record(&mut self, user_id: &str, record: &ExpenseRecord) -> ClientResult<()>;

    /// Appends every row or none of them. Stored rows are never rewritten.
    fn append_records(&mut self, user_id: &str, records: &[ExpenseRecord]) -> ClientResult<()>;

    /// Replaces the whole collection. Writing the same rows twice leaves the
    /// same state behind.
    fn overwrite_records(&mut self, user_id: &str, records: &[ExpenseRecord]) -> ClientResult<()>;
}

/// In-process record source, one collection per user.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: HashMap<String, Vec<ExpenseRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(user_id: &str, records: Vec<ExpenseRecord>) -> Self {
        let mut store = Self::new();
        store.collections.insert(user_id.to_string(), records);
        store
    }
}

impl RecordSource for MemoryStore {
    fn records(&self, user_id: &str) -> ClientResult<Vec<ExpenseRecord>> {
        Ok(self.collections.get(user_id).cloned().unwrap_or_default())
    }
}

impl RecordWriter for MemoryStore {
    fn append_record(&mut self, user_id: &str, record: &ExpenseRecord) -> ClientResult<()> {
        self.collections
            .entry(user_id.to_string())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    fn append_records(&mut self, user_id: &str, records: &[ExpenseRecord]) -> ClientResult<()> {
        self.collections
            .entry(user_id.to_string())
            .or_default()
            .extend_from_slice(records);
        Ok(())
    }

    fn overwrite_records(&mut self, user_id: &str, records: &[ExpenseRecord]) -> ClientResult<()> {
        self.collections
            .insert(user_id.to_string(), records.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryStore, RecordSource, RecordWriter};
    use crate::analytics::types::ExpenseRecord;

    #[test]
    fn unknown_user_reads_empty() {
        let store = MemoryStore::new();
        let records = store.records("nobody");
        assert!(records.is_ok());
        if let Ok(records) = records {
            assert!(records.is_empty());
        }
    }

    #[test]
    fn users_are_isolated_and_overwrite_is_idempotent() {
        let mut store = MemoryStore::new();
        let rows = vec![
            ExpenseRecord::new("2026-09-01", 10.0, "food", "tea"),
            ExpenseRecord::new("2026-09-02", 20.0, "fuel", ""),
        ];
        assert!(store.overwrite_records("a", &rows).is_ok());
        assert!(store.overwrite_records("a", &rows).is_ok());
        assert!(
            store
                .append_record("b", &ExpenseRecord::new("2026-09-03", 5.0, "misc", ""))
                .is_ok()
        );

        let a = store.records("a");
        let b = store.records("b");
        assert!(a.is_ok() && b.is_ok());
        if let (Ok(a), Ok(b)) = (a, b) {
            assert_eq!(a, rows);
            assert_eq!(b.len(), 1);
        }
    }
}
