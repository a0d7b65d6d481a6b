use crate::ClientResult;
use crate::analytics::policy::INSIGHT_POLICY_VERSION;
use crate::analytics::user::UserAnalytics;
use crate::commands::common::{ProfileScope, open_context};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::InsightsData;

pub fn run() -> ClientResult<SuccessEnvelope> {
    run_with_options(ProfileScope::default())
}

#[doc(hidden)]
pub fn run_with_options(scope: ProfileScope<'_>) -> ClientResult<SuccessEnvelope> {
    let context = open_context(scope)?;
    let insights = UserAnalytics::new(&context.store, &context.user, context.as_of).insights()?;

    success(
        "insights",
        InsightsData {
            as_of: context.as_of_label(),
            user: context.user,
            policy_version: INSIGHT_POLICY_VERSION.to_string(),
            insights,
        },
    )
}
