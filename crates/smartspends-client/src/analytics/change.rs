use crate::analytics::date::AsOf;
use crate::analytics::types::{ExpenseRecord, SpendingChange};
use crate::analytics::window::{between, sum_amounts};

/// Compares `[now - period, now)` against the equally long window before it.
pub fn spending_change(records: &[ExpenseRecord], period_days: i64, as_of: AsOf) -> SpendingChange {
    let end = as_of.instant();
    let start = as_of.days_back(period_days);
    let previous_start = as_of.days_back(period_days.saturating_mul(2));

    let recent = sum_amounts(&between(records, start, end));
    let previous = sum_amounts(&between(records, previous_start, start));
    let percent_change = if previous == 0.0 {
        None
    } else {
        Some(((recent - previous) / previous) * 100.0)
    };

    SpendingChange {
        recent,
        previous,
        percent_change,
    }
}
