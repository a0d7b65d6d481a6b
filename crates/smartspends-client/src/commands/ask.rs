use crate::analytics::assistant::{answer, classify};
use crate::commands::common::{ProfileScope, open_context};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::AskData;
use crate::store::RecordSource;
use crate::{ClientError, ClientResult};

pub fn run(question: &str) -> ClientResult<SuccessEnvelope> {
    run_with_options(ProfileScope::default(), question)
}

#[doc(hidden)]
pub fn run_with_options(scope: ProfileScope<'_>, question: &str) -> ClientResult<SuccessEnvelope> {
    if question.trim().is_empty() {
        return Err(ClientError::invalid_argument_with_recovery(
            "Question must not be blank.",
            vec![
                "Try `smartspends ask \"Where am I overspending?\"`.".to_string(),
                "Or `smartspends ask \"Any subscriptions?\"`.".to_string(),
            ],
        ));
    }

    let context = open_context(scope)?;
    let records = context.store.records(&context.user)?;
    let intent = if records.is_empty() {
        "no_data"
    } else {
        classify(question).as_str()
    };
    let reply = answer(&records, question, context.as_of);

    success(
        "ask",
        AskData {
            as_of: context.as_of_label(),
            user: context.user,
            question: question.trim().to_string(),
            intent: intent.to_string(),
            answer: reply,
        },
    )
}
