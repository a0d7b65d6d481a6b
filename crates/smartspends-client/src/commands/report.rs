use crate::analytics::breakdown::{category_totals, weekday_totals};
use crate::analytics::date::{Frequency, format_iso_date};
use crate::analytics::series::time_series;
use crate::commands::common::{ProfileScope, open_context};
use crate::commands::{categories, trend, weekdays};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ReportExportData;
use crate::reports::{
    CATEGORY_COMPARISON_CHART, SPENDING_TREND_CHART, TabularChart, WEEKDAY_SPENDING_CHART,
    export_chart,
};
use crate::store::RecordSource;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Trend,
    Categories,
    Weekdays,
}

impl ReportKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trend" => Some(Self::Trend),
            "categories" => Some(Self::Categories),
            "weekdays" => Some(Self::Weekdays),
            _ => None,
        }
    }

    pub const fn chart_name(self) -> &'static str {
        match self {
            Self::Trend => SPENDING_TREND_CHART,
            Self::Categories => CATEGORY_COMPARISON_CHART,
            Self::Weekdays => WEEKDAY_SPENDING_CHART,
        }
    }
}

pub fn export(kind: &str) -> ClientResult<SuccessEnvelope> {
    export_with_options(ProfileScope::default(), kind)
}

#[doc(hidden)]
pub fn export_with_options(scope: ProfileScope<'_>, kind: &str) -> ClientResult<SuccessEnvelope> {
    let report = ReportKind::parse(kind).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!("Unknown report `{kind}`. Use trend, categories or weekdays."),
            Some("report export"),
        )
    })?;

    let context = open_context(scope)?;
    let records = context.store.records(&context.user)?;
    let chart = match report {
        ReportKind::Trend => TabularChart::new(
            "bucket",
            "total",
            time_series(
                &records,
                Frequency::Daily,
                trend::DEFAULT_LOOKBACK_MONTHS,
                context.as_of,
            )
            .into_iter()
            .map(|point| (format_iso_date(&point.bucket), point.total))
            .collect(),
        ),
        ReportKind::Categories => TabularChart::new(
            "category",
            "total",
            category_totals(&records, categories::DEFAULT_WINDOW_DAYS, context.as_of)
                .into_iter()
                .map(|row| (row.category, row.total))
                .collect(),
        ),
        ReportKind::Weekdays => TabularChart::new(
            "weekday",
            "total",
            weekday_totals(&records, weekdays::DEFAULT_WINDOW_DAYS, context.as_of)
                .into_iter()
                .map(|row| (row.weekday_name().to_string(), row.total))
                .collect(),
        ),
    };

    let path = export_chart(
        &context.setup.reports_dir,
        report.chart_name(),
        &context.user,
        &chart,
    )?;

    success(
        "report export",
        ReportExportData {
            as_of: context.as_of_label(),
            user: context.user.clone(),
            chart: report.chart_name().to_string(),
            path: path.display().to_string(),
            rows: chart.len(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::ReportKind;

    #[test]
    fn report_kinds_map_to_chart_names() {
        assert_eq!(ReportKind::parse("Trend"), Some(ReportKind::Trend));
        assert_eq!(
            ReportKind::parse("categories").map(ReportKind::chart_name),
            Some("category_comparison")
        );
        assert_eq!(
            ReportKind::parse("weekdays").map(ReportKind::chart_name),
            Some("weekday_spending")
        );
        assert!(ReportKind::parse("pie").is_none());
    }
}
