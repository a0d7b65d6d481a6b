use chrono::{NaiveDate, NaiveDateTime};

use crate::analytics::date::{AsOf, record_instant};
use crate::analytics::types::ExpenseRecord;

#[derive(Debug, Clone, Copy)]
pub(crate) struct DatedRecord<'a> {
    pub(crate) date: NaiveDate,
    pub(crate) record: &'a ExpenseRecord,
}

pub(crate) fn dated_records(records: &[ExpenseRecord]) -> impl Iterator<Item = DatedRecord<'_>> {
    records.iter().filter_map(|record| {
        record
            .posted_on()
            .map(|date| DatedRecord { date, record })
    })
}

/// Records dated at or after `start`. Dates compare as midnight instants.
pub(crate) fn since(records: &[ExpenseRecord], start: NaiveDateTime) -> Vec<DatedRecord<'_>> {
    dated_records(records)
        .filter(|row| record_instant(row.date) >= start)
        .collect()
}

/// Records inside the half-open range `[start, end)`.
pub(crate) fn between(
    records: &[ExpenseRecord],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<DatedRecord<'_>> {
    dated_records(records)
        .filter(|row| {
            let instant = record_instant(row.date);
            instant >= start && instant < end
        })
        .collect()
}

pub(crate) fn sum_amounts(rows: &[DatedRecord<'_>]) -> f64 {
    rows.iter().map(|row| row.record.amount).sum()
}

/// Total spent over the trailing `days`, the figure a weekly limit is checked
/// against.
pub fn trailing_total(records: &[ExpenseRecord], days: i64, as_of: AsOf) -> f64 {
    sum_amounts(&since(records, as_of.days_back(days)))
}

/// Total spent from midnight on the first of the current month up to `as_of`.
pub fn month_to_date_total(records: &[ExpenseRecord], as_of: AsOf) -> f64 {
    dated_records(records)
        .filter(|row| {
            let instant = record_instant(row.date);
            instant >= as_of.month_start() && instant <= as_of.instant()
        })
        .map(|row| row.record.amount)
        .sum()
}
