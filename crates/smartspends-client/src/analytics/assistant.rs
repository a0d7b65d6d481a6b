use crate::analytics::breakdown::{category_totals, top_share_percent};
use crate::analytics::date::AsOf;
use crate::analytics::insights::generate_insights;
use crate::analytics::policy::{ASSISTANT_POLICY_V1, AssistantPolicy, RecurringOptions};
use crate::analytics::recurring::detect_recurring;
use crate::analytics::types::{CURRENCY_SYMBOL, ExpenseRecord, format_money};
use crate::analytics::window::month_to_date_total;

pub const NO_EXPENSES_ANSWER: &str =
    "No expenses recorded yet. Add expenses or upload CSV so I can analyze your spending.";

pub const FALLBACK_ANSWER: &str = "Sorry, I didn't catch that. Try: 'Where am I overspending?', \
'How much have I spent this month?', 'Top categories', or 'Any subscriptions?'";

const SUMMARY_PHRASES: [&str; 3] = ["summary", "give me summary", "overview"];

/// What a free-text question is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryIntent {
    Overspend,
    TopCategories,
    MonthToDate,
    SavingTips,
    Recurring,
    Summary,
    Unrecognized,
}

impl QueryIntent {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overspend => "overspend",
            Self::TopCategories => "top_categories",
            Self::MonthToDate => "month_to_date",
            Self::SavingTips => "saving_tips",
            Self::Recurring => "recurring",
            Self::Summary => "summary",
            Self::Unrecognized => "unrecognized",
        }
    }
}

type IntentRule = (QueryIntent, fn(&str) -> bool);

/// Checked top to bottom; the first predicate that accepts the normalized
/// question decides the intent.
const RULES: [IntentRule; 6] = [
    (QueryIntent::Overspend, asks_overspend),
    (QueryIntent::TopCategories, asks_top_categories),
    (QueryIntent::MonthToDate, asks_month_to_date),
    (QueryIntent::SavingTips, asks_saving_tips),
    (QueryIntent::Recurring, asks_recurring),
    (QueryIntent::Summary, asks_summary),
];

fn asks_overspend(q: &str) -> bool {
    q.contains("overspend")
}

fn asks_top_categories(q: &str) -> bool {
    q.contains("top categories") || q.contains("top category")
}

fn asks_month_to_date(q: &str) -> bool {
    q.contains("this month") && q.contains("spent")
}

fn asks_saving_tips(q: &str) -> bool {
    q.contains("how to save") || q.contains("tips")
}

fn asks_recurring(q: &str) -> bool {
    q.contains("recurring") || q.contains("subscription")
}

fn asks_summary(q: &str) -> bool {
    SUMMARY_PHRASES.contains(&q)
}

pub fn classify(question: &str) -> QueryIntent {
    let normalized = question.trim().to_lowercase();
    RULES
        .iter()
        .find(|(_, matches)| matches(&normalized))
        .map(|(intent, _)| *intent)
        .unwrap_or(QueryIntent::Unrecognized)
}

pub fn answer(records: &[ExpenseRecord], question: &str, as_of: AsOf) -> String {
    answer_with_policy(records, question, as_of, ASSISTANT_POLICY_V1)
}

pub fn answer_with_policy(
    records: &[ExpenseRecord],
    question: &str,
    as_of: AsOf,
    policy: AssistantPolicy,
) -> String {
    if records.is_empty() {
        return NO_EXPENSES_ANSWER.to_string();
    }
    let intent = classify(question);
    tracing::debug!(intent = intent.as_str(), "classified spending question");
    respond(intent, records, as_of, policy)
}

pub fn respond(
    intent: QueryIntent,
    records: &[ExpenseRecord],
    as_of: AsOf,
    policy: AssistantPolicy,
) -> String {
    match intent {
        QueryIntent::Overspend => overspend_answer(records, as_of, policy),
        QueryIntent::TopCategories => top_categories_answer(records, as_of, policy),
        QueryIntent::MonthToDate => format!(
            "You've spent {} this month so far.",
            format_money(month_to_date_total(records, as_of))
        ),
        QueryIntent::SavingTips => saving_tips_answer(records, as_of, policy),
        QueryIntent::Recurring => recurring_answer(records, as_of),
        QueryIntent::Summary => generate_insights(records, as_of).join("\n"),
        QueryIntent::Unrecognized => FALLBACK_ANSWER.to_string(),
    }
}

fn overspend_answer(records: &[ExpenseRecord], as_of: AsOf, policy: AssistantPolicy) -> String {
    let totals = category_totals(records, policy.overspend_window_days, as_of);
    let Some((top, share)) = top_share_percent(&totals) else {
        return format!(
            "I couldn't find spending records for the last {} days.",
            policy.overspend_window_days
        );
    };
    format!(
        "You're spending most on {0}, {share:.0}% of month spending. \
Try limiting frequency or set a sub-budget for {0}.",
        top.category
    )
}

fn top_categories_answer(records: &[ExpenseRecord], as_of: AsOf, policy: AssistantPolicy) -> String {
    let totals = category_totals(records, policy.top_categories_window_days, as_of);
    if totals.is_empty() {
        return "No category data found.".to_string();
    }
    let lines = totals
        .iter()
        .take(policy.top_categories_limit)
        .enumerate()
        .map(|(index, row)| format!("{}. {}: {}", index + 1, row.category, format_money(row.total)))
        .collect::<Vec<String>>();
    format!(
        "Top categories (last {} days):\n{}",
        policy.top_categories_window_days,
        lines.join("\n")
    )
}

fn saving_tips_answer(records: &[ExpenseRecord], as_of: AsOf, policy: AssistantPolicy) -> String {
    let mut tips = Vec::new();
    let totals = category_totals(records, policy.overspend_window_days, as_of);
    if let Some(top) = totals.first() {
        tips.push(format!(
            "Cut down {} by {:.0}% and save {CURRENCY_SYMBOL}{:.0} monthly.",
            top.category,
            policy.savings_cut_ratio * 100.0,
            top.total * policy.savings_cut_ratio
        ));
    }
    tips.push("Unsubscribe unused services; cook at home; set weekly budgets.".to_string());
    format!("Suggested actions:\n- {}", tips.join("\n- "))
}

fn recurring_answer(records: &[ExpenseRecord], as_of: AsOf) -> String {
    let recurring = detect_recurring(records, RecurringOptions::default(), as_of);
    if recurring.is_empty() {
        return "No obvious recurring charges detected.".to_string();
    }
    let lines = recurring
        .iter()
        .map(|entry| {
            format!(
                "{} - {} times, avg {}",
                entry.note,
                entry.occurrence_count,
                format_money(entry.average_amount)
            )
        })
        .collect::<Vec<String>>();
    format!("Recurring payments found:\n{}", lines.join("\n"))
}
