/// Identifier emitted with insight output so threshold changes stay auditable.
pub const INSIGHT_POLICY_VERSION: &str = "insights/v1";

/// v1 insight heuristics.
///
/// Notes:
/// - `trend_band_percent` is the flat band inside which a week-over-week move is
///   reported as stable rather than as a trend.
/// - `outlier_multiplier` flags the largest transaction when it exceeds that
///   multiple of the mean amount. It is a fixed heuristic, not a statistical test.
#[derive(Debug, Clone, Copy)]
pub struct InsightPolicy {
    pub top_category_window_days: i64,
    pub change_period_days: i64,
    pub trend_band_percent: f64,
    pub recurring_preview_limit: usize,
    pub outlier_multiplier: f64,
}

impl InsightPolicy {
    pub fn classify_change(self, percent_change: Option<f64>) -> TrendKind {
        match percent_change {
            None => TrendKind::NoBaseline,
            Some(value) if value > self.trend_band_percent => TrendKind::Increase,
            Some(value) if value < -self.trend_band_percent => TrendKind::Decrease,
            Some(_) => TrendKind::Stable,
        }
    }

    pub fn is_outlier(self, amount: f64, mean_amount: f64) -> bool {
        amount > mean_amount * self.outlier_multiplier
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendKind {
    NoBaseline,
    Increase,
    Decrease,
    Stable,
}

pub const INSIGHT_POLICY_V1: InsightPolicy = InsightPolicy {
    top_category_window_days: 30,
    change_period_days: 7,
    trend_band_percent: 10.0,
    recurring_preview_limit: 3,
    outlier_multiplier: 3.0,
};

/// v1 windows and ratios used by the question responder.
#[derive(Debug, Clone, Copy)]
pub struct AssistantPolicy {
    pub overspend_window_days: i64,
    pub top_categories_window_days: i64,
    pub top_categories_limit: usize,
    pub savings_cut_ratio: f64,
}

pub const ASSISTANT_POLICY_V1: AssistantPolicy = AssistantPolicy {
    overspend_window_days: 30,
    top_categories_window_days: 90,
    top_categories_limit: 5,
    savings_cut_ratio: 0.10,
};

#[derive(Debug, Clone, Copy)]
pub struct RecurringOptions {
    pub min_occurrences: usize,
    pub window_days: i64,
}

impl Default for RecurringOptions {
    fn default() -> Self {
        Self {
            min_occurrences: 3,
            window_days: 90,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{INSIGHT_POLICY_V1, TrendKind};

    #[test]
    fn trend_band_boundaries_are_stable() {
        let policy = INSIGHT_POLICY_V1;
        assert_eq!(policy.classify_change(None), TrendKind::NoBaseline);
        assert_eq!(policy.classify_change(Some(10.0)), TrendKind::Stable);
        assert_eq!(policy.classify_change(Some(-10.0)), TrendKind::Stable);
        assert_eq!(policy.classify_change(Some(10.0001)), TrendKind::Increase);
        assert_eq!(policy.classify_change(Some(-10.0001)), TrendKind::Decrease);
    }

    #[test]
    fn outlier_threshold_is_strictly_greater_than_multiple_of_mean() {
        let policy = INSIGHT_POLICY_V1;
        assert!(!policy.is_outlier(30.0, 10.0));
        assert!(policy.is_outlier(30.01, 10.0));
    }
}
