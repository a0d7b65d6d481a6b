use crate::ClientResult;
use crate::analytics::policy::{INSIGHT_POLICY_V1, TrendKind};
use crate::analytics::user::UserAnalytics;
use crate::commands::common::{ProfileScope, cents, open_context, require_positive_days};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ChangeData;

#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeRunOptions<'a> {
    pub scope: ProfileScope<'a>,
    pub days: Option<i64>,
}

pub fn run(days: Option<i64>) -> ClientResult<SuccessEnvelope> {
    run_with_options(ChangeRunOptions {
        days,
        ..ChangeRunOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ChangeRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let period_days = require_positive_days(
        options.days.unwrap_or(INSIGHT_POLICY_V1.change_period_days),
        "--days",
        "change",
    )?;

    let context = open_context(options.scope)?;
    let analytics = UserAnalytics::new(&context.store, &context.user, context.as_of);
    let change = analytics.spending_change(period_days)?;
    let trend = match INSIGHT_POLICY_V1.classify_change(change.percent_change) {
        TrendKind::NoBaseline => "no_baseline",
        TrendKind::Increase => "increase",
        TrendKind::Decrease => "decrease",
        TrendKind::Stable => "stable",
    };

    success(
        "change",
        ChangeData {
            user: context.user.clone(),
            as_of: context.as_of_label(),
            period_days,
            recent: cents(change.recent),
            previous: cents(change.previous),
            percent_change: change.percent_change.map(cents),
            trend: trend.to_string(),
        },
    )
}
