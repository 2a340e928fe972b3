//! The trailing query window sent to the observation portal.

use chrono::{Datelike, Duration, Local, NaiveDate};
use std::fmt;

/// Days before "today" at which the window starts.
pub const WINDOW_START_DAYS_AGO: i64 = 10;
/// Days before "today" at which the window ends (inclusive).
pub const WINDOW_END_DAYS_AGO: i64 = 1;

/// A trailing window of calendar days, `today - 10 ..= today - 1`.
///
/// Each component is kept as the string the portal form expects: years as
/// plain digits, months and days zero-padded to two digits. The wire text is
/// produced by [`DateRange::to_wire`] (also available through `Display`).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use jma_sunlight::DateRange;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let range = DateRange::ending_before(today);
/// assert_eq!(range.to_wire(), r#"["2024","2024","03","03","05","14"]"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start_year: String,
    pub end_year: String,
    pub start_month: String,
    pub end_month: String,
    pub start_day: String,
    pub end_day: String,
}

impl DateRange {
    /// Builds the window that ends the day before `today`.
    pub fn ending_before(today: NaiveDate) -> Self {
        let start = today - Duration::days(WINDOW_START_DAYS_AGO);
        let end = today - Duration::days(WINDOW_END_DAYS_AGO);
        Self::between(start, end)
    }

    /// Builds the window from the local wall-clock date.
    pub fn from_now() -> Self {
        Self::ending_before(Local::now().date_naive())
    }

    fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_year: start.year().to_string(),
            end_year: end.year().to_string(),
            start_month: pad2(start.month()),
            end_month: pad2(end.month()),
            start_day: pad2(start.day()),
            end_day: pad2(end.day()),
        }
    }

    /// Serializes the range as the bracketed string array the portal form expects,
    /// e.g. `["2024","2024","03","03","05","14"]`.
    pub fn to_wire(&self) -> String {
        format!(
            r#"["{}","{}","{}","{}","{}","{}"]"#,
            self.start_year,
            self.end_year,
            self.start_month,
            self.end_month,
            self.start_day,
            self.end_day
        )
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

fn pad2(component: u32) -> String {
    format!("{:02}", component)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_within_one_month() {
        let range = DateRange::ending_before(date(2024, 3, 15));
        assert_eq!(range.start_year, "2024");
        assert_eq!(range.start_month, "03");
        assert_eq!(range.start_day, "05");
        assert_eq!(range.end_day, "14");
        assert_eq!(range.to_wire(), r#"["2024","2024","03","03","05","14"]"#);
    }

    #[test]
    fn test_window_crossing_year_boundary() {
        let range = DateRange::ending_before(date(2024, 1, 5));
        assert_eq!(range.to_wire(), r#"["2023","2024","12","01","26","04"]"#);
    }

    #[test]
    fn test_window_on_first_of_month() {
        // 2024 is a leap year, so the window reaches back into February 20..29.
        let range = DateRange::ending_before(date(2024, 3, 1));
        assert_eq!(range.to_wire(), r#"["2024","2024","02","02","20","29"]"#);
    }

    #[test]
    fn test_same_input_yields_identical_output() {
        let today = date(2024, 3, 15);
        assert_eq!(DateRange::ending_before(today), DateRange::ending_before(today));
        assert_eq!(
            DateRange::ending_before(today).to_string(),
            DateRange::ending_before(today).to_wire()
        );
    }
}
