use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExpenseRow {
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpenseAddData {
    pub user: String,
    pub expense: ExpenseRow,
    pub weekly_total: f64,
    pub weekly_limit: f64,
    pub over_limit: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpenseListData {
    pub user: String,
    pub as_of: String,
    /// `last_7_days` or `all`.
    pub scope: String,
    pub rows: Vec<ExpenseRow>,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportColumns {
    pub date: String,
    pub amount: String,
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub rows_read: usize,
    pub debits: usize,
    pub non_debit_rows: usize,
    pub invalid_date_rows: usize,
    pub invalid_amount_rows: usize,
    pub imported: usize,
    pub collection_size: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportData {
    pub user: String,
    pub dry_run: bool,
    pub source_kind: String,
    pub source_ref: Option<String>,
    pub category: String,
    pub columns: ImportColumns,
    pub summary: ImportSummary,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LimitData {
    pub user: String,
    pub weekly_limit: f64,
    pub updated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashData {
    pub user: String,
    pub as_of: String,
    pub weekly_spent: f64,
    pub weekly_limit: f64,
    pub remaining: f64,
    pub over_limit: bool,
    pub transaction_count: usize,
    pub policy_version: String,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub bucket: String,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendData {
    pub user: String,
    pub as_of: String,
    pub frequency: String,
    pub lookback_months: u32,
    pub points: Vec<TrendPoint>,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRow {
    pub category: String,
    pub total: f64,
    pub share_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoriesData {
    pub user: String,
    pub as_of: String,
    pub window_days: i64,
    pub rows: Vec<CategoryRow>,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekdayRow {
    pub weekday: String,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekdaysData {
    pub user: String,
    pub as_of: String,
    pub window_days: i64,
    pub rows: Vec<WeekdayRow>,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecurringRow {
    pub note: String,
    pub count: usize,
    pub avg: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecurringData {
    pub user: String,
    pub as_of: String,
    pub min_occurrences: usize,
    pub window_days: i64,
    pub rows: Vec<RecurringRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangeData {
    pub user: String,
    pub as_of: String,
    pub period_days: i64,
    pub recent: f64,
    pub previous: f64,
    pub percent_change: Option<f64>,
    /// `no_baseline`, `increase`, `decrease` or `stable`.
    pub trend: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightsData {
    pub user: String,
    pub as_of: String,
    pub policy_version: String,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AskData {
    pub user: String,
    pub as_of: String,
    pub question: String,
    pub intent: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportExportData {
    pub user: String,
    pub as_of: String,
    pub chart: String,
    pub path: String,
    pub rows: usize,
}
