use std::collections::HashMap;

use chrono::Datelike;

use crate::analytics::date::AsOf;
use crate::analytics::types::{CategoryTotal, ExpenseRecord, WEEKDAYS_MONDAY_FIRST, WeekdayTotal};
use crate::analytics::window::since;

/// Spending per category over the trailing `window_days`, largest first.
///
/// Equal totals keep the order in which their categories first appear.
pub fn category_totals(records: &[ExpenseRecord], window_days: i64, as_of: AsOf) -> Vec<CategoryTotal> {
    let rows = since(records, as_of.days_back(window_days));

    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index_by_category: HashMap<&str, usize> = HashMap::new();
    for row in &rows {
        let category = row.record.category.as_str();
        match index_by_category.get(category) {
            Some(index) => totals[*index].total += row.record.amount,
            None => {
                index_by_category.insert(category, totals.len());
                totals.push(CategoryTotal {
                    category: category.to_string(),
                    total: row.record.amount,
                });
            }
        }
    }

    totals.sort_by(|left, right| right.total.total_cmp(&left.total));
    totals
}

/// Spending per weekday over the trailing `window_days`, always seven entries
/// in Monday..Sunday order.
pub fn weekday_totals(records: &[ExpenseRecord], window_days: i64, as_of: AsOf) -> Vec<WeekdayTotal> {
    let rows = since(records, as_of.days_back(window_days));

    let mut sums = [0.0_f64; 7];
    for row in &rows {
        let slot = row.date.weekday().num_days_from_monday() as usize;
        sums[slot] += row.record.amount;
    }

    WEEKDAYS_MONDAY_FIRST
        .iter()
        .zip(sums)
        .map(|(weekday, total)| WeekdayTotal {
            weekday: *weekday,
            total,
        })
        .collect()
}

/// Share of `total` taken by the leading category, in percent. Zero when
/// nothing was spent.
pub fn top_share_percent(totals: &[CategoryTotal]) -> Option<(&CategoryTotal, f64)> {
    let top = totals.first()?;
    let sum: f64 = totals.iter().map(|row| row.total).sum();
    let share = if sum > 0.0 { (top.total / sum) * 100.0 } else { 0.0 };
    Some((top, share))
}
