use crate::commands::common::{ProfileScope, open_context};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::LimitData;
use crate::{ClientError, ClientResult};

pub fn show() -> ClientResult<SuccessEnvelope> {
    show_with_options(ProfileScope::default())
}

#[doc(hidden)]
pub fn show_with_options(scope: ProfileScope<'_>) -> ClientResult<SuccessEnvelope> {
    let context = open_context(scope)?;
    let weekly_limit = context.store.weekly_limit(&context.user)?;
    success(
        "limit show",
        LimitData {
            user: context.user,
            weekly_limit,
            updated: false,
        },
    )
}

pub fn set(amount: f64) -> ClientResult<SuccessEnvelope> {
    set_with_options(ProfileScope::default(), amount)
}

#[doc(hidden)]
pub fn set_with_options(scope: ProfileScope<'_>, amount: f64) -> ClientResult<SuccessEnvelope> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ClientError::invalid_argument_for_command(
            "Weekly limit must be zero or a positive amount.",
            Some("limit set"),
        ));
    }

    let mut context = open_context(scope)?;
    context.store.set_weekly_limit(&context.user, amount)?;
    success(
        "limit set",
        LimitData {
            user: context.user,
            weekly_limit: amount,
            updated: true,
        },
    )
}
