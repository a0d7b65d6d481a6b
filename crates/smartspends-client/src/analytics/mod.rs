pub mod assistant;
pub mod breakdown;
pub mod change;
pub mod date;
pub mod insights;
pub mod policy;
pub mod recurring;
pub mod series;
pub mod types;
pub mod user;
pub(crate) mod window;

pub use assistant::{QueryIntent, answer, classify};
pub use breakdown::{category_totals, weekday_totals};
pub use change::spending_change;
pub use date::{AsOf, Frequency, parse_date_flexibly, parse_expense_date};
pub use insights::generate_insights;
pub use policy::{INSIGHT_POLICY_V1, INSIGHT_POLICY_VERSION, RecurringOptions};
pub use recurring::{ExactNote, NoteMatcher, detect_recurring, detect_recurring_with_matcher};
pub use series::time_series;
pub use types::{
    CategoryTotal, ExpenseRecord, RecurringEntry, SeriesPoint, SpendingChange, WeekdayTotal,
};
pub use user::{UserAnalytics, weekly_total};
pub use window::{month_to_date_total, trailing_total};
