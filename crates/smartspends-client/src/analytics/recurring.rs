use crate::analytics::date::AsOf;
use crate::analytics::policy::RecurringOptions;
use crate::analytics::types::{ExpenseRecord, RecurringEntry};
use crate::analytics::window::since;

/// Decides whether two expense notes describe the same charge.
pub trait NoteMatcher {
    fn same_charge(&self, left: &str, right: &str) -> bool;
}

/// Verbatim, case-sensitive note equality. "Netflix Jan" and "Netflix Feb"
/// are different charges under this matcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactNote;

impl NoteMatcher for ExactNote {
    fn same_charge(&self, left: &str, right: &str) -> bool {
        left == right
    }
}

#[derive(Debug)]
struct NoteGroup<'a> {
    note: &'a str,
    count: usize,
    sum: f64,
}

pub fn detect_recurring(
    records: &[ExpenseRecord],
    options: RecurringOptions,
    as_of: AsOf,
) -> Vec<RecurringEntry> {
    detect_recurring_with_matcher(records, options, as_of, &ExactNote)
}

/// Notes seen at least `min_occurrences` times inside the trailing window,
/// most frequent first. Blank notes never form a group.
pub fn detect_recurring_with_matcher(
    records: &[ExpenseRecord],
    options: RecurringOptions,
    as_of: AsOf,
    matcher: &dyn NoteMatcher,
) -> Vec<RecurringEntry> {
    let rows = since(records, as_of.days_back(options.window_days));

    let mut groups: Vec<NoteGroup<'_>> = Vec::new();
    for row in &rows {
        let note = row.record.note.as_str();
        if note.is_empty() {
            continue;
        }
        match groups
            .iter_mut()
            .find(|group| matcher.same_charge(group.note, note))
        {
            Some(group) => {
                group.count += 1;
                group.sum += row.record.amount;
            }
            None => groups.push(NoteGroup {
                note,
                count: 1,
                sum: row.record.amount,
            }),
        }
    }

    groups.sort_by(|left, right| right.count.cmp(&left.count));

    groups
        .into_iter()
        .filter(|group| group.count >= options.min_occurrences)
        .map(|group| RecurringEntry {
            note: group.note.to_string(),
            occurrence_count: group.count,
            average_amount: group.sum / group.count as f64,
        })
        .collect()
}
