use std::collections::BTreeMap;

use crate::analytics::date::{AsOf, Frequency};
use crate::analytics::types::{ExpenseRecord, SeriesPoint};
use crate::analytics::window::since;

/// Spending per bucket over the trailing `lookback_months`.
///
/// The series runs from the first to the last non-empty bucket in
/// chronological order, with every bucket in between present (zero-filled).
pub fn time_series(
    records: &[ExpenseRecord],
    frequency: Frequency,
    lookback_months: u32,
    as_of: AsOf,
) -> Vec<SeriesPoint> {
    let rows = since(records, as_of.months_back(lookback_months));

    let mut buckets: BTreeMap<chrono::NaiveDate, f64> = BTreeMap::new();
    for row in &rows {
        *buckets
            .entry(frequency.bucket_label(row.date))
            .or_insert(0.0) += row.record.amount;
    }

    let (Some(first), Some(last)) = (
        buckets.keys().next().copied(),
        buckets.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    let mut series = Vec::new();
    let mut label = first;
    while label <= last {
        series.push(SeriesPoint {
            bucket: label,
            total: buckets.get(&label).copied().unwrap_or(0.0),
        });
        label = frequency.next_label(label);
    }
    series
}
