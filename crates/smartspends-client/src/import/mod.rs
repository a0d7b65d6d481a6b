pub(crate) mod input;
pub(crate) mod parse;

use crate::ClientResult;
use crate::contracts::types::{ImportColumns, ImportData, ImportSummary};
use crate::store::{RecordSource, RecordWriter};

pub use parse::ColumnOverrides;

#[derive(Debug, Clone)]
pub(crate) struct ImportRequest<'a> {
    pub(crate) user_id: &'a str,
    pub(crate) path: &'a str,
    pub(crate) overrides: &'a ColumnOverrides,
    pub(crate) dry_run: bool,
    pub(crate) stdin_override: Option<String>,
}

/// Parses a bank statement and appends its debits after the user's stored
/// expenses, unreadable rows included. A dry run stops before anything is written.
pub(crate) fn execute<S>(store: &mut S, request: ImportRequest<'_>) -> ClientResult<ImportData>
where
    S: RecordSource + RecordWriter,
{
    let source = input::resolve_source(request.path, request.stdin_override)?;
    let statement = parse::parse_statement(&source.content, request.overrides)?;
    let debits = statement.debits.len();

    let existing_count = store.records(request.user_id)?.len();

    let imported = if request.dry_run {
        0
    } else {
        store.append_records(request.user_id, &statement.debits)?;
        debits
    };

    tracing::info!(
        user = request.user_id,
        rows_read = statement.rows_read,
        debits,
        imported,
        dry_run = request.dry_run,
        "bank statement processed"
    );

    let message = if request.dry_run {
        format!("Found {debits} debits. No rows were written.")
    } else {
        format!("Imported {debits} debits.")
    };

    Ok(ImportData {
        user: request.user_id.to_string(),
        dry_run: request.dry_run,
        source_kind: source.source_kind.as_str().to_string(),
        source_ref: source.source_ref,
        category: parse::BANK_DEBIT_CATEGORY.to_string(),
        columns: ImportColumns {
            date: statement.mapping.header(statement.mapping.date).to_string(),
            amount: statement.mapping.header(statement.mapping.amount).to_string(),
            note: statement.mapping.header(statement.mapping.note).to_string(),
        },
        summary: ImportSummary {
            rows_read: statement.rows_read,
            debits,
            non_debit_rows: statement.non_debit_rows,
            invalid_date_rows: statement.invalid_date_rows,
            invalid_amount_rows: statement.invalid_amount_rows,
            imported,
            collection_size: existing_count + imported,
        },
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::{ColumnOverrides, ImportRequest, execute};
    use crate::analytics::types::ExpenseRecord;
    use crate::store::{MemoryStore, RecordSource};

    const STATEMENT: &str = "Date,Description,Debit\n01/09/2026,Netflix,499\n02/09/2026,Coffee,120\n";

    fn request<'a>(overrides: &'a ColumnOverrides, dry_run: bool) -> ImportRequest<'a> {
        ImportRequest {
            user_id: "asha",
            path: "-",
            overrides,
            dry_run,
            stdin_override: Some(STATEMENT.to_string()),
        }
    }

    #[test]
    fn merge_appends_after_existing_rows() {
        let mut store = MemoryStore::with_records(
            "asha",
            vec![ExpenseRecord::new("2026-08-30", 50.0, "food", "lunch")],
        );
        let overrides = ColumnOverrides::default();
        let result = execute(&mut store, request(&overrides, false));
        assert!(result.is_ok());
        if let Ok(data) = result {
            assert_eq!(data.summary.imported, 2);
            assert_eq!(data.summary.collection_size, 3);
            assert_eq!(data.message, "Imported 2 debits.");
        }

        let records = store.records("asha").unwrap_or_default();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].note, "lunch");
        assert_eq!(records[2], ExpenseRecord::new("2026-09-02", 120.0, "Bank Debit", "Coffee"));
    }

    #[test]
    fn dry_run_leaves_store_untouched() {
        let mut store = MemoryStore::new();
        let overrides = ColumnOverrides::default();
        let result = execute(&mut store, request(&overrides, true));
        assert!(result.is_ok());
        if let Ok(data) = result {
            assert!(data.dry_run);
            assert_eq!(data.summary.debits, 2);
            assert_eq!(data.summary.imported, 0);
            assert_eq!(data.summary.collection_size, 0);
        }
        assert_eq!(store.records("asha").map(|rows| rows.len()).ok(), Some(0));
    }

    #[test]
    fn commit_goes_through_append_not_rewrite() {
        let mut store = MemoryStore::with_records(
            "asha",
            vec![ExpenseRecord::new("2026-08-30", 50.0, "food", "lunch")],
        );
        let overrides = ColumnOverrides::default();
        assert!(execute(&mut store, request(&overrides, false)).is_ok());
        assert!(execute(&mut store, request(&overrides, false)).is_ok());

        let records = store.records("asha").unwrap_or_default();
        assert_eq!(records.len(), 5);
        assert_eq!(records[3].note, "Netflix");
    }
}
