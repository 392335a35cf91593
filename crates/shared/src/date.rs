use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month, macros::format_description};
use validator::ValidationError;

/// Parses a strict `yyyy-MM-dd` calendar date.
pub fn parse_iso_date(value: &str) -> crate::Result<Date> {
    if value.len() != 10 {
        crate::user!("invalid date '{value}', expected yyyy-MM-dd");
    }

    match Date::parse(value, format_description!("[year]-[month]-[day]")) {
        Ok(date) => Ok(date),
        Err(_) => crate::user!("invalid date '{value}', expected yyyy-MM-dd"),
    }
}

pub fn format_iso_date(date: Date) -> crate::Result<String> {
    date.format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| crate::Error::Unknown(e.into()))
}

pub fn validate_iso_date(value: &str) -> Result<(), ValidationError> {
    parse_iso_date(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("iso_date").with_message("Expected a yyyy-MM-dd date".into()))
}

/// Inclusive calendar window expressed as ISO date strings.
///
/// ISO `yyyy-MM-dd` strings sort lexicographically the same way they sort
/// chronologically, so every comparison here is a plain string comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

impl DateRange {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> crate::Result<Self> {
        let start_date = start_date.into();
        let end_date = end_date.into();

        parse_iso_date(&start_date)?;
        parse_iso_date(&end_date)?;

        if start_date > end_date {
            crate::user!("startDate {start_date} is after endDate {end_date}");
        }

        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Monday to Sunday week containing `date`.
    pub fn week_of(date: &str) -> crate::Result<Self> {
        let date = parse_iso_date(date)?;
        let offset = date.weekday().number_days_from_monday() as i64;

        let Some(monday) = date.checked_sub(Duration::days(offset)) else {
            crate::user!("date out of range");
        };
        let Some(sunday) = monday.checked_add(Duration::days(6)) else {
            crate::user!("date out of range");
        };

        Ok(Self {
            start_date: format_iso_date(monday)?,
            end_date: format_iso_date(sunday)?,
        })
    }

    /// First to last day of the month containing `date`.
    pub fn month_of(date: &str) -> crate::Result<Self> {
        let date = parse_iso_date(date)?;
        let first = date.replace_day(1).map_err(|e| crate::Error::Unknown(e.into()))?;

        let next_first = match date.month() {
            Month::December => Date::from_calendar_date(date.year() + 1, Month::January, 1),
            month => Date::from_calendar_date(date.year(), month.next(), 1),
        }
        .map_err(|e| crate::Error::Unknown(e.into()))?;

        let Some(last) = next_first.previous_day() else {
            crate::user!("date out of range");
        };

        Ok(Self {
            start_date: format_iso_date(first)?,
            end_date: format_iso_date(last)?,
        })
    }

    /// Inclusive interval overlap: `start <= range.end && end >= range.start`.
    pub fn overlaps(&self, start_date: &str, end_date: &str) -> bool {
        start_date <= self.end_date.as_str() && end_date >= self.start_date.as_str()
    }
}
