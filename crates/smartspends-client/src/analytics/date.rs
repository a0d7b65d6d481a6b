use chrono::{Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};

const ISO_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const FLEXIBLE_DATE_FORMATS: [&str; 5] = ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y", "%d.%m.%Y"];

/// Day-first textual layouts tried after the numeric ones, mirroring what a
/// bank statement export usually contains.
const TEXTUAL_DATE_FORMATS: [&str; 4] = ["%d %b %Y", "%d-%b-%Y", "%d %B %Y", "%Y/%m/%d"];

/// The instant every windowed aggregation is evaluated against.
///
/// Windows are right-closed at this instant. Callers take one snapshot per
/// logical operation and pass it down, so a comparison never straddles two
/// different clock reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AsOf(NaiveDateTime);

impl AsOf {
    pub fn now() -> Self {
        Self(Local::now().naive_local())
    }

    pub const fn at(instant: NaiveDateTime) -> Self {
        Self(instant)
    }

    pub fn end_of_day(date: NaiveDate) -> Self {
        let instant = date
            .and_hms_opt(23, 59, 59)
            .unwrap_or_else(|| date.and_time(NaiveTime::MIN));
        Self(instant)
    }

    pub const fn instant(self) -> NaiveDateTime {
        self.0
    }

    pub fn today(self) -> NaiveDate {
        self.0.date()
    }

    pub fn days_back(self, days: i64) -> NaiveDateTime {
        Duration::try_days(days)
            .and_then(|delta| self.0.checked_sub_signed(delta))
            .unwrap_or(NaiveDateTime::MIN)
    }

    pub fn months_back(self, months: u32) -> NaiveDateTime {
        self.0
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDateTime::MIN)
    }

    pub fn month_start(self) -> NaiveDateTime {
        let date = self.today();
        date.with_day(1)
            .unwrap_or(date)
            .and_time(NaiveTime::MIN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "d" | "day" | "daily" => Some(Self::Daily),
            "w" | "week" | "weekly" => Some(Self::Weekly),
            "m" | "month" | "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    /// Label of the bucket containing `date`.
    ///
    /// Weekly buckets run Monday..Sunday and carry the Sunday; monthly buckets
    /// carry the last calendar day of the month.
    pub fn bucket_label(self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Daily => date,
            Self::Weekly => {
                let to_sunday = 6 - i64::from(date.weekday().num_days_from_monday());
                date + Duration::days(to_sunday)
            }
            Self::Monthly => month_end(date),
        }
    }

    pub fn next_label(self, label: NaiveDate) -> NaiveDate {
        match self {
            Self::Daily => label + Duration::days(1),
            Self::Weekly => label + Duration::days(7),
            Self::Monthly => {
                let first = label.with_day(1).unwrap_or(label);
                month_end(add_months_clamped(first, 1))
            }
        }
    }
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn record_instant(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Parses a stored expense date. Anything unreadable yields `None` and the row
/// drops out of every windowed view.
pub fn parse_expense_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ISO_DATETIME_FORMATS {
        if let Ok(instant) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(instant.date());
        }
    }
    parse_date_flexibly(trimmed)
}

pub fn parse_date_flexibly(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    FLEXIBLE_DATE_FORMATS
        .iter()
        .chain(TEXTUAL_DATE_FORMATS.iter())
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

pub fn add_months_clamped(date: NaiveDate, months: i32) -> NaiveDate {
    let current_month = i32::try_from(date.month()).unwrap_or(1);
    let mut raw_month = current_month + months;
    let mut year = date.year();

    while raw_month > 12 {
        raw_month -= 12;
        year += 1;
    }
    while raw_month < 1 {
        raw_month += 12;
        year -= 1;
    }

    let month_u32 = u32::try_from(raw_month).unwrap_or(1);
    let day = date.day().min(days_in_month(year, month_u32));
    if let Some(result) = NaiveDate::from_ymd_opt(year, month_u32, day) {
        return result;
    }
    date
}

fn month_end(date: NaiveDate) -> NaiveDate {
    let last_day = days_in_month(date.year(), date.month());
    date.with_day(last_day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
