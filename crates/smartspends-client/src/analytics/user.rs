use crate::ClientResult;
use crate::analytics::assistant::answer;
use crate::analytics::breakdown::{category_totals, weekday_totals};
use crate::analytics::change::spending_change;
use crate::analytics::date::{AsOf, Frequency};
use crate::analytics::insights::generate_insights;
use crate::analytics::policy::RecurringOptions;
use crate::analytics::recurring::detect_recurring;
use crate::analytics::series::time_series;
use crate::analytics::types::{
    CategoryTotal, ExpenseRecord, RecurringEntry, SeriesPoint, SpendingChange, WeekdayTotal,
};
use crate::analytics::window::trailing_total;
use crate::store::RecordSource;

/// One user's analytics over a record source.
///
/// Every call reads a fresh snapshot, so results track writes made between
/// calls. Only the source read can fail.
pub struct UserAnalytics<'a, S: RecordSource + ?Sized> {
    source: &'a S,
    user_id: &'a str,
    as_of: AsOf,
}

impl<'a, S: RecordSource + ?Sized> UserAnalytics<'a, S> {
    pub fn new(source: &'a S, user_id: &'a str, as_of: AsOf) -> Self {
        Self {
            source,
            user_id,
            as_of,
        }
    }

    pub fn as_of(&self) -> AsOf {
        self.as_of
    }

    pub fn records(&self) -> ClientResult<Vec<ExpenseRecord>> {
        self.source.records(self.user_id)
    }

    pub fn time_series(&self, frequency: Frequency, lookback_months: u32) -> ClientResult<Vec<SeriesPoint>> {
        Ok(time_series(&self.records()?, frequency, lookback_months, self.as_of))
    }

    pub fn category_totals(&self, window_days: i64) -> ClientResult<Vec<CategoryTotal>> {
        Ok(category_totals(&self.records()?, window_days, self.as_of))
    }

    pub fn weekday_totals(&self, window_days: i64) -> ClientResult<Vec<WeekdayTotal>> {
        Ok(weekday_totals(&self.records()?, window_days, self.as_of))
    }

    pub fn detect_recurring(&self, options: RecurringOptions) -> ClientResult<Vec<RecurringEntry>> {
        Ok(detect_recurring(&self.records()?, options, self.as_of))
    }

    pub fn spending_change(&self, period_days: i64) -> ClientResult<SpendingChange> {
        Ok(spending_change(&self.records()?, period_days, self.as_of))
    }

    pub fn weekly_total(&self) -> ClientResult<f64> {
        Ok(weekly_total(&self.records()?, self.as_of))
    }

    pub fn insights(&self) -> ClientResult<Vec<String>> {
        Ok(generate_insights(&self.records()?, self.as_of))
    }

    pub fn answer(&self, question: &str) -> ClientResult<String> {
        Ok(answer(&self.records()?, question, self.as_of))
    }
}

/// Spending inside the trailing seven days.
pub fn weekly_total(records: &[ExpenseRecord], as_of: AsOf) -> f64 {
    trailing_total(records, 7, as_of)
}
