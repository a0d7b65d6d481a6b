use crate::analytics::date::{format_iso_date, parse_date_flexibly};
use crate::analytics::types::ExpenseRecord;
use crate::{ClientError, ClientResult};

pub(crate) const BANK_DEBIT_CATEGORY: &str = "Bank Debit";

const AMOUNT_HINTS: [&str; 3] = ["debit", "withdraw", "amount"];
const DATE_HINTS: [&str; 1] = ["date"];
const NOTE_HINTS: [&str; 3] = ["desc", "narration", "details"];

const CURRENCY_MARKS: [&str; 6] = ["₹", "$", "€", "£", "INR", "Rs."];

/// Header names picked by the caller instead of detection.
#[derive(Debug, Clone, Default)]
pub struct ColumnOverrides {
    pub date: Option<String>,
    pub amount: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct ColumnMapping {
    pub(crate) date: usize,
    pub(crate) amount: usize,
    pub(crate) note: usize,
    pub(crate) headers: Vec<String>,
}

impl ColumnMapping {
    pub(crate) fn header(&self, index: usize) -> &str {
        self.headers.get(index).map(String::as_str).unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ParsedStatement {
    pub(crate) mapping: ColumnMapping,
    pub(crate) rows_read: usize,
    pub(crate) non_debit_rows: usize,
    pub(crate) invalid_date_rows: usize,
    pub(crate) invalid_amount_rows: usize,
    pub(crate) debits: Vec<ExpenseRecord>,
}

pub(crate) fn parse_statement(
    content: &str,
    overrides: &ColumnOverrides,
) -> ClientResult<ParsedStatement> {
    if content.trim().is_empty() {
        return Err(ClientError::import_invalid_format("Statement is empty."));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| ClientError::import_invalid_format("CSV header row is missing or unreadable."))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    let mapping = ColumnMapping {
        amount: pick_column("amount", &headers, overrides.amount.as_deref(), &AMOUNT_HINTS)?,
        date: pick_column("date", &headers, overrides.date.as_deref(), &DATE_HINTS)?,
        note: pick_column("note", &headers, overrides.note.as_deref(), &NOTE_HINTS)?,
        headers,
    };

    let mut statement = ParsedStatement {
        mapping,
        rows_read: 0,
        non_debit_rows: 0,
        invalid_date_rows: 0,
        invalid_amount_rows: 0,
        debits: Vec::new(),
    };

    for result_row in reader.records() {
        let record = result_row
            .map_err(|_| ClientError::import_invalid_format("CSV rows are malformed or not UTF-8."))?;
        statement.rows_read += 1;

        let amount_cell = record.get(statement.mapping.amount).unwrap_or_default().trim();
        if amount_cell.is_empty() {
            statement.non_debit_rows += 1;
            continue;
        }

        let Some(posted_on) = record
            .get(statement.mapping.date)
            .and_then(parse_date_flexibly)
        else {
            statement.invalid_date_rows += 1;
            continue;
        };

        let Some(amount) = parse_amount(amount_cell) else {
            statement.invalid_amount_rows += 1;
            continue;
        };

        let note = record.get(statement.mapping.note).unwrap_or_default().trim();
        statement.debits.push(ExpenseRecord::new(
            &format_iso_date(&posted_on),
            amount,
            BANK_DEBIT_CATEGORY,
            note,
        ));
    }

    Ok(statement)
}

/// An explicit header wins; otherwise the first header containing any hint,
/// compared case-insensitively.
fn pick_column(
    role: &str,
    headers: &[String],
    explicit: Option<&str>,
    hints: &[&str],
) -> ClientResult<usize> {
    let found = match explicit {
        Some(name) => headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name.trim())),
        None => headers.iter().position(|header| {
            let lowered = header.to_lowercase();
            hints.iter().any(|hint| lowered.contains(hint))
        }),
    };
    found.ok_or_else(|| ClientError::import_column_missing(role, headers.to_vec()))
}

/// Accepts `1,234.50`, `₹ 99`, `Rs. 10` and similar. Negative or non-finite
/// values are not debits.
pub(crate) fn parse_amount(value: &str) -> Option<f64> {
    let mut cleaned = value.replace(',', "");
    for mark in CURRENCY_MARKS {
        cleaned = cleaned.replace(mark, "");
    }
    let amount = cleaned.trim().parse::<f64>().ok()?;
    (amount.is_finite() && amount >= 0.0).then_some(amount)
}
