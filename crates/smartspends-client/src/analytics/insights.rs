use crate::analytics::breakdown::{category_totals, top_share_percent};
use crate::analytics::change::spending_change;
use crate::analytics::date::AsOf;
use crate::analytics::policy::{INSIGHT_POLICY_V1, InsightPolicy, RecurringOptions, TrendKind};
use crate::analytics::recurring::detect_recurring;
use crate::analytics::types::{ExpenseRecord, format_money};

pub const NO_EXPENSES_INSIGHT: &str =
    "No expenses recorded yet. Add some expenses or upload a bank CSV to get insights.";

pub fn generate_insights(records: &[ExpenseRecord], as_of: AsOf) -> Vec<String> {
    generate_insights_with_policy(records, as_of, INSIGHT_POLICY_V1)
}

/// Short plain-text observations, in display order. Each step contributes at
/// most one sentence and none of them can fail.
pub fn generate_insights_with_policy(
    records: &[ExpenseRecord],
    as_of: AsOf,
    policy: InsightPolicy,
) -> Vec<String> {
    if records.is_empty() {
        return vec![NO_EXPENSES_INSIGHT.to_string()];
    }

    let steps = [
        top_category_insight(records, as_of, policy),
        change_insight(records, as_of, policy),
        recurring_insight(records, as_of, policy),
        large_transaction_insight(records, policy),
    ];
    steps.into_iter().flatten().collect()
}

fn top_category_insight(records: &[ExpenseRecord], as_of: AsOf, policy: InsightPolicy) -> Option<String> {
    let totals = category_totals(records, policy.top_category_window_days, as_of);
    let (top, share) = top_share_percent(&totals)?;
    Some(format!(
        "In the last {} days, your top category is {} accounting for {share:.0}% of your spending.",
        policy.top_category_window_days, top.category
    ))
}

fn change_insight(records: &[ExpenseRecord], as_of: AsOf, policy: InsightPolicy) -> Option<String> {
    let change = spending_change(records, policy.change_period_days, as_of);
    let sentence = match (policy.classify_change(change.percent_change), change.percent_change) {
        (TrendKind::NoBaseline, _) | (_, None) => format!(
            "Your spending last {} days: {}. No previous period to compare.",
            policy.change_period_days,
            format_money(change.recent)
        ),
        (TrendKind::Increase, Some(percent)) => {
            format!("Spending increased by {percent:.0}% compared to the previous week.")
        }
        (TrendKind::Decrease, Some(percent)) => format!(
            "Good job! Spending decreased by {:.0}% from last week.",
            percent.abs()
        ),
        (TrendKind::Stable, Some(_)) => "Spending is stable compared to last week.".to_string(),
    };
    Some(sentence)
}

fn recurring_insight(records: &[ExpenseRecord], as_of: AsOf, policy: InsightPolicy) -> Option<String> {
    let recurring = detect_recurring(records, RecurringOptions::default(), as_of);
    if recurring.is_empty() {
        return None;
    }
    let names = recurring
        .iter()
        .take(policy.recurring_preview_limit)
        .map(|entry| entry.note.as_str())
        .collect::<Vec<&str>>()
        .join(", ");
    Some(format!(
        "Detected recurring charges: {names}. Consider adding them to 'Subscriptions'."
    ))
}

fn large_transaction_insight(records: &[ExpenseRecord], policy: InsightPolicy) -> Option<String> {
    let mut largest: Option<&ExpenseRecord> = None;
    for record in records {
        if largest.is_none_or(|current| record.amount > current.amount) {
            largest = Some(record);
        }
    }
    let largest = largest?;

    let mean = records.iter().map(|record| record.amount).sum::<f64>() / records.len() as f64;
    if !policy.is_outlier(largest.amount, mean) {
        return None;
    }
    Some(format!(
        "A large transaction detected: {} on {}.",
        format_money(largest.amount),
        largest.date
    ))
}
