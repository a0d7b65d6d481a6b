use crate::analytics::policy::RecurringOptions;
use crate::analytics::user::UserAnalytics;
use crate::commands::common::{ProfileScope, cents, open_context, require_positive_days};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{RecurringData, RecurringRow};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct RecurringRunOptions<'a> {
    pub scope: ProfileScope<'a>,
    pub min_occurrences: Option<usize>,
    pub days: Option<i64>,
}

pub fn run(min_occurrences: Option<usize>, days: Option<i64>) -> ClientResult<SuccessEnvelope> {
    run_with_options(RecurringRunOptions {
        min_occurrences,
        days,
        ..RecurringRunOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: RecurringRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let defaults = RecurringOptions::default();
    let min_occurrences = options.min_occurrences.unwrap_or(defaults.min_occurrences);
    if min_occurrences == 0 {
        return Err(ClientError::invalid_argument_for_command(
            "`--min-occurrences` must be at least 1.",
            Some("recurring"),
        ));
    }
    let window_days = require_positive_days(
        options.days.unwrap_or(defaults.window_days),
        "--days",
        "recurring",
    )?;

    let context = open_context(options.scope)?;
    let analytics = UserAnalytics::new(&context.store, &context.user, context.as_of);
    let rows = analytics
        .detect_recurring(RecurringOptions {
            min_occurrences,
            window_days,
        })?
        .into_iter()
        .map(|entry| RecurringRow {
            note: entry.note,
            count: entry.occurrence_count,
            avg: cents(entry.average_amount),
        })
        .collect::<Vec<RecurringRow>>();

    success(
        "recurring",
        RecurringData {
            user: context.user.clone(),
            as_of: context.as_of_label(),
            min_occurrences,
            window_days,
            rows,
        },
    )
}
