use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, OptionalExtension, params};
use ulid::Ulid;

use crate::ClientResult;
use crate::analytics::types::ExpenseRecord;
use crate::setup::SetupContext;
use crate::state::{map_sqlite_error, open_connection};
use crate::store::{RecordSource, RecordWriter};

pub const DEFAULT_WEEKLY_LIMIT: f64 = 1000.0;

/// SQLite-backed expense store shared by every user profile in one data home.
pub struct LedgerStore {
    connection: Connection,
    db_path: PathBuf,
}

impl LedgerStore {
    pub fn open(context: &SetupContext) -> ClientResult<Self> {
        Self::open_path(&context.db_path)
    }

    pub fn open_path(db_path: &Path) -> ClientResult<Self> {
        Ok(Self {
            connection: open_connection(db_path)?,
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn weekly_limit(&self, user_id: &str) -> ClientResult<f64> {
        let stored = self
            .connection
            .query_row(
                "SELECT weekly_limit FROM internal_user_settings WHERE user_id = ?1 LIMIT 1",
                [user_id],
                |row| row.get::<_, f64>(0),
            )
            .optional()
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;
        Ok(stored.unwrap_or(DEFAULT_WEEKLY_LIMIT))
    }

    pub fn set_weekly_limit(&mut self, user_id: &str, limit: f64) -> ClientResult<()> {
        self.connection
            .execute(
                "INSERT INTO internal_user_settings (user_id, weekly_limit, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(user_id) DO UPDATE SET
                   weekly_limit = excluded.weekly_limit,
                   updated_at = excluded.updated_at",
                params![user_id, limit, timestamp_now()],
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;
        tracing::info!(user = user_id, limit, "weekly limit updated");
        Ok(())
    }

    fn next_position(&self, user_id: &str) -> ClientResult<i64> {
        self.connection
            .query_row(
                "SELECT COALESCE(MAX(position), -1) + 1 FROM internal_expenses WHERE user_id = ?1",
                [user_id],
                |row| row.get::<_, i64>(0),
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))
    }
}

impl RecordSource for LedgerStore {
    fn records(&self, user_id: &str) -> ClientResult<Vec<ExpenseRecord>> {
        let mut statement = self
            .connection
            .prepare(
                "SELECT posted_at, amount, category, note
                 FROM internal_expenses
                 WHERE user_id = ?1
                 ORDER BY position ASC",
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let rows = statement
            .query_map([user_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, SqlValue>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let mut records = Vec::new();
        let mut skipped = 0_usize;
        for row in rows {
            let (date, amount, category, note) =
                row.map_err(|error| map_sqlite_error(&self.db_path, &error))?;
            match stored_amount(&amount) {
                Some(amount) => records.push(ExpenseRecord {
                    date,
                    amount,
                    category,
                    note,
                }),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::warn!(user = user_id, skipped, "dropped rows with malformed amounts");
        }
        tracing::debug!(user = user_id, count = records.len(), "loaded expense records");
        Ok(records)
    }
}

impl RecordWriter for LedgerStore {
    fn append_record(&mut self, user_id: &str, record: &ExpenseRecord) -> ClientResult<()> {
        let position = self.next_position(user_id)?;
        insert_record(&self.connection, user_id, position, record)
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;
        tracing::debug!(user = user_id, position, "appended expense record");
        Ok(())
    }

    fn append_records(&mut self, user_id: &str, records: &[ExpenseRecord]) -> ClientResult<()> {
        let first_position = self.next_position(user_id)?;
        let transaction = self
            .connection
            .transaction()
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        for (offset, record) in records.iter().enumerate() {
            insert_record(&transaction, user_id, first_position + offset as i64, record)
                .map_err(|error| map_sqlite_error(&self.db_path, &error))?;
        }

        transaction
            .commit()
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;
        tracing::info!(
            user = user_id,
            count = records.len(),
            first_position,
            "appended expense records"
        );
        Ok(())
    }

    fn overwrite_records(&mut self, user_id: &str, records: &[ExpenseRecord]) -> ClientResult<()> {
        let transaction = self
            .connection
            .transaction()
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        transaction
            .execute("DELETE FROM internal_expenses WHERE user_id = ?1", [user_id])
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;
        for (position, record) in records.iter().enumerate() {
            insert_record(&transaction, user_id, position as i64, record)
                .map_err(|error| map_sqlite_error(&self.db_path, &error))?;
        }

        transaction
            .commit()
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;
        tracing::info!(user = user_id, count = records.len(), "replaced expense collection");
        Ok(())
    }
}

fn insert_record(
    connection: &Connection,
    user_id: &str,
    position: i64,
    record: &ExpenseRecord,
) -> rusqlite::Result<usize> {
    connection.execute(
        "INSERT INTO internal_expenses
           (expense_id, user_id, position, posted_at, amount, category, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            format!("exp_{}", Ulid::new()),
            user_id,
            position,
            record.date,
            record.amount,
            record.category,
            record.note,
            timestamp_now(),
        ],
    )
}

/// Usable amounts are finite and non-negative. Text that reads as a number is
/// accepted so hand-edited rows still load.
fn stored_amount(value: &SqlValue) -> Option<f64> {
    let amount = match value {
        SqlValue::Real(amount) => *amount,
        SqlValue::Integer(amount) => *amount as f64,
        SqlValue::Text(text) => text.trim().parse::<f64>().ok()?,
        SqlValue::Null | SqlValue::Blob(_) => return None,
    };
    (amount.is_finite() && amount >= 0.0).then_some(amount)
}

fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
