pub mod ask;
pub mod categories;
pub mod change;
pub mod common;
pub mod dash;
pub mod expense;
pub mod import;
pub mod insights;
pub mod limit;
pub mod recurring;
pub mod report;
pub mod trend;
pub mod weekdays;
