use crate::{ClientError, ClientResult};
use crate::analytics::date::{format_iso_date, parse_date_flexibly};
use crate::analytics::types::ExpenseRecord;
use crate::analytics::user::weekly_total;
use crate::analytics::window::since;
use crate::commands::common::{ProfileScope, cents, open_context};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ExpenseAddData, ExpenseListData, ExpenseRow};
use crate::store::{RecordSource, RecordWriter};

const LIST_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Default)]
pub struct ExpenseAddOptions<'a> {
    pub scope: ProfileScope<'a>,
    pub amount: f64,
    pub category: String,
    pub note: Option<String>,
    /// Any format the flexible date parser reads; defaults to the as-of date.
    pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExpenseListOptions<'a> {
    pub scope: ProfileScope<'a>,
    pub all: bool,
}

pub fn add(amount: f64, category: &str, note: Option<&str>) -> ClientResult<SuccessEnvelope> {
    add_with_options(ExpenseAddOptions {
        amount,
        category: category.to_string(),
        note: note.map(str::to_string),
        ..ExpenseAddOptions::default()
    })
}

#[doc(hidden)]
pub fn add_with_options(options: ExpenseAddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    if !options.amount.is_finite() || options.amount <= 0.0 {
        return Err(ClientError::invalid_argument_for_command(
            "Amount must be greater than zero.",
            Some("expense add"),
        ));
    }
    let category = options.category.trim();
    if category.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "Category must not be blank.",
            Some("expense add"),
        ));
    }

    let mut context = open_context(options.scope)?;
    let posted_on = match options.date.as_deref() {
        Some(value) => parse_date_flexibly(value).ok_or_else(|| {
            ClientError::invalid_argument_for_command(
                &format!("Could not read date `{value}`."),
                Some("expense add"),
            )
        })?,
        None => context.as_of.today(),
    };

    let record = ExpenseRecord::new(
        &format_iso_date(&posted_on),
        options.amount,
        category,
        options.note.as_deref().map(str::trim).unwrap_or_default(),
    );
    context.store.append_record(&context.user, &record)?;
    tracing::info!(user = %context.user, amount = record.amount, category = %record.category, "expense added");

    let records = context.store.records(&context.user)?;
    let spent = weekly_total(&records, context.as_of);
    let weekly_limit = context.store.weekly_limit(&context.user)?;

    success(
        "expense add",
        ExpenseAddData {
            user: context.user,
            expense: expense_row(&record),
            weekly_total: cents(spent),
            weekly_limit,
            over_limit: spent > weekly_limit,
        },
    )
}

pub fn list(all: bool) -> ClientResult<SuccessEnvelope> {
    list_with_options(ExpenseListOptions {
        all,
        ..ExpenseListOptions::default()
    })
}

#[doc(hidden)]
pub fn list_with_options(options: ExpenseListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let context = open_context(options.scope)?;
    let records = context.store.records(&context.user)?;

    let rows = if options.all {
        records.iter().map(expense_row).collect::<Vec<ExpenseRow>>()
    } else {
        since(&records, context.as_of.days_back(LIST_WINDOW_DAYS))
            .into_iter()
            .map(|row| expense_row(row.record))
            .collect::<Vec<ExpenseRow>>()
    };
    let total = rows.iter().map(|row| row.amount).sum::<f64>();

    success(
        "expense list",
        ExpenseListData {
            as_of: context.as_of_label(),
            user: context.user,
            scope: if options.all { "all" } else { "last_7_days" }.to_string(),
            total: cents(total),
            rows,
        },
    )
}

fn expense_row(record: &ExpenseRecord) -> ExpenseRow {
    ExpenseRow {
        date: record.date.clone(),
        amount: record.amount,
        category: record.category.clone(),
        note: record.note.clone(),
    }
}
