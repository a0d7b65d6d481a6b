use crate::ClientResult;
use crate::analytics::user::UserAnalytics;
use crate::commands::common::{ProfileScope, cents, open_context, require_positive_days};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CategoriesData, CategoryRow};

pub const DEFAULT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoriesRunOptions<'a> {
    pub scope: ProfileScope<'a>,
    pub days: Option<i64>,
}

pub fn run(days: Option<i64>) -> ClientResult<SuccessEnvelope> {
    run_with_options(CategoriesRunOptions {
        days,
        ..CategoriesRunOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: CategoriesRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let days = require_positive_days(
        options.days.unwrap_or(DEFAULT_WINDOW_DAYS),
        "--days",
        "categories",
    )?;

    let context = open_context(options.scope)?;
    let analytics = UserAnalytics::new(&context.store, &context.user, context.as_of);
    let totals = analytics.category_totals(days)?;
    let sum = totals.iter().map(|row| row.total).sum::<f64>();

    let rows = totals
        .iter()
        .map(|row| CategoryRow {
            category: row.category.clone(),
            total: cents(row.total),
            share_percent: if sum > 0.0 {
                cents(row.total / sum * 100.0)
            } else {
                0.0
            },
        })
        .collect::<Vec<CategoryRow>>();

    success(
        "categories",
        CategoriesData {
            user: context.user.clone(),
            as_of: context.as_of_label(),
            window_days: days,
            rows,
            total: cents(sum),
        },
    )
}
