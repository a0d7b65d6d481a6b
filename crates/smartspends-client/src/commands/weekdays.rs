use crate::ClientResult;
use crate::analytics::user::UserAnalytics;
use crate::commands::common::{ProfileScope, cents, open_context, require_positive_days};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{WeekdayRow, WeekdaysData};

pub const DEFAULT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, Default)]
pub struct WeekdaysRunOptions<'a> {
    pub scope: ProfileScope<'a>,
    pub days: Option<i64>,
}

pub fn run(days: Option<i64>) -> ClientResult<SuccessEnvelope> {
    run_with_options(WeekdaysRunOptions {
        days,
        ..WeekdaysRunOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: WeekdaysRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let days = require_positive_days(
        options.days.unwrap_or(DEFAULT_WINDOW_DAYS),
        "--days",
        "weekdays",
    )?;

    let context = open_context(options.scope)?;
    let analytics = UserAnalytics::new(&context.store, &context.user, context.as_of);
    let rows = analytics
        .weekday_totals(days)?
        .iter()
        .map(|row| WeekdayRow {
            weekday: row.weekday_name().to_string(),
            total: cents(row.total),
        })
        .collect::<Vec<WeekdayRow>>();
    let total = rows.iter().map(|row| row.total).sum::<f64>();

    success(
        "weekdays",
        WeekdaysData {
            user: context.user.clone(),
            as_of: context.as_of_label(),
            window_days: days,
            rows,
            total: cents(total),
        },
    )
}
