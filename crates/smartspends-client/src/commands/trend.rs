use crate::analytics::date::{Frequency, format_iso_date};
use crate::analytics::user::UserAnalytics;
use crate::commands::common::{ProfileScope, cents, open_context};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{TrendData, TrendPoint};
use crate::{ClientError, ClientResult};

pub const DEFAULT_LOOKBACK_MONTHS: u32 = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct TrendRunOptions<'a> {
    pub scope: ProfileScope<'a>,
    pub frequency: Option<&'a str>,
    pub months: Option<u32>,
}

pub fn run(frequency: Option<&str>, months: Option<u32>) -> ClientResult<SuccessEnvelope> {
    run_with_options(TrendRunOptions {
        frequency,
        months,
        ..TrendRunOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: TrendRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let frequency = parse_frequency(options.frequency)?;
    let months = options.months.unwrap_or(DEFAULT_LOOKBACK_MONTHS);
    if months == 0 {
        return Err(ClientError::invalid_argument_for_command(
            "`--months` must be at least 1.",
            Some("trend"),
        ));
    }

    let context = open_context(options.scope)?;
    let analytics = UserAnalytics::new(&context.store, &context.user, context.as_of);
    let points = analytics
        .time_series(frequency, months)?
        .iter()
        .map(|point| TrendPoint {
            bucket: format_iso_date(&point.bucket),
            total: cents(point.total),
        })
        .collect::<Vec<TrendPoint>>();
    let total = points.iter().map(|point| point.total).sum::<f64>();

    success(
        "trend",
        TrendData {
            user: context.user.clone(),
            as_of: context.as_of_label(),
            frequency: frequency.as_str().to_string(),
            lookback_months: months,
            points,
            total: cents(total),
        },
    )
}

pub(crate) fn parse_frequency(value: Option<&str>) -> ClientResult<Frequency> {
    match value {
        None => Ok(Frequency::Daily),
        Some(raw) => Frequency::parse(raw).ok_or_else(|| {
            ClientError::invalid_argument_for_command(
                &format!("Unknown frequency `{raw}`. Use daily, weekly or monthly."),
                Some("trend"),
            )
        }),
    }
}
