use chrono::{NaiveDate, Weekday};

use crate::analytics::date::parse_expense_date;

pub const CURRENCY_SYMBOL: &str = "₹";

/// One logged expense as the record source hands it over.
///
/// `date` stays verbatim: the analytics layer parses it on read and treats an
/// unreadable value as "outside every window" rather than as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub note: String,
}

impl ExpenseRecord {
    pub fn new(date: &str, amount: f64, category: &str, note: &str) -> Self {
        Self {
            date: date.to_string(),
            amount,
            category: category.to_string(),
            note: note.to_string(),
        }
    }

    pub fn posted_on(&self) -> Option<NaiveDate> {
        parse_expense_date(&self.date)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub bucket: NaiveDate,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekdayTotal {
    pub weekday: Weekday,
    pub total: f64,
}

impl WeekdayTotal {
    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecurringEntry {
    pub note: String,
    pub occurrence_count: usize,
    pub average_amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpendingChange {
    pub recent: f64,
    pub previous: f64,
    /// `None` when the previous window has no spending to compare against.
    pub percent_change: Option<f64>,
}

pub const WEEKDAYS_MONDAY_FIRST: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn format_money(amount: f64) -> String {
    format!("{CURRENCY_SYMBOL}{amount:.2}")
}
