use crate::ClientResult;
use crate::analytics::insights::generate_insights;
use crate::analytics::policy::INSIGHT_POLICY_VERSION;
use crate::analytics::user::weekly_total;
use crate::commands::common::{ProfileScope, cents, open_context};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::DashData;
use crate::store::RecordSource;

pub fn run() -> ClientResult<SuccessEnvelope> {
    run_with_options(ProfileScope::default())
}

#[doc(hidden)]
pub fn run_with_options(scope: ProfileScope<'_>) -> ClientResult<SuccessEnvelope> {
    let context = open_context(scope)?;
    let records = context.store.records(&context.user)?;
    let weekly_limit = context.store.weekly_limit(&context.user)?;
    let spent = weekly_total(&records, context.as_of);

    success(
        "dash",
        DashData {
            as_of: context.as_of_label(),
            user: context.user,
            weekly_spent: cents(spent),
            weekly_limit,
            remaining: cents((weekly_limit - spent).max(0.0)),
            over_limit: spent > weekly_limit,
            transaction_count: records.len(),
            policy_version: INSIGHT_POLICY_VERSION.to_string(),
            insights: generate_insights(&records, context.as_of),
        },
    )
}
