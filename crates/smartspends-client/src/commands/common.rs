use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use crate::analytics::date::AsOf;
use crate::setup::{SetupContext, ensure_initialized_with_home_override};
use crate::state::resolve_user;
use crate::store::LedgerStore;
use crate::{ClientError, ClientResult};

const AS_OF_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Who a command runs for and at which instant. Every field falls back to the
/// environment when left unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileScope<'a> {
    pub user: Option<&'a str>,
    /// `YYYY-MM-DD` (read as 23:59:59) or `YYYY-MM-DDTHH:MM:SS`.
    pub as_of: Option<&'a str>,
    pub home_override: Option<&'a Path>,
}

pub(crate) struct CommandContext {
    pub(crate) setup: SetupContext,
    pub(crate) user: String,
    pub(crate) as_of: AsOf,
    pub(crate) store: LedgerStore,
}

impl CommandContext {
    pub(crate) fn as_of_label(&self) -> String {
        format_as_of(self.as_of)
    }
}

pub(crate) fn open_context(scope: ProfileScope<'_>) -> ClientResult<CommandContext> {
    let as_of = match scope.as_of {
        Some(value) => parse_as_of(value).ok_or_else(|| {
            ClientError::invalid_argument_with_recovery(
                &format!("Invalid --as-of value `{value}`."),
                vec!["Use `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`.".to_string()],
            )
        })?,
        None => AsOf::now(),
    };
    let setup = ensure_initialized_with_home_override(scope.home_override)?;
    let store = LedgerStore::open(&setup)?;
    let user = resolve_user(scope.user);
    tracing::debug!(user = %user, as_of = %format_as_of(as_of), "command context ready");

    Ok(CommandContext {
        setup,
        user,
        as_of,
        store,
    })
}

pub fn parse_as_of(value: &str) -> Option<AsOf> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(AsOf::end_of_day(date));
    }
    AS_OF_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(AsOf::at)
}

pub fn format_as_of(as_of: AsOf) -> String {
    as_of.instant().format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Rounds a currency amount to whole cents for output.
pub(crate) fn cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn require_positive_days(value: i64, flag: &str, command: &str) -> ClientResult<i64> {
    if value < 1 {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`{flag}` must be at least 1, got {value}."),
            Some(command),
        ));
    }
    Ok(value)
}
