//! The normalized daily observation produced by the crawler.

use chrono::NaiveDate;
use serde::Serialize;

/// One day of sunshine observations for the configured station.
///
/// Records are produced in export order, which the portal emits chronologically
/// (one row per calendar day, ascending). Numeric fields hold `f64::NAN` when the
/// export cell could not be read as a number, so a gap never drops the whole day.
///
/// # Examples
///
/// ```
/// use jma_sunlight::SunlightRecord;
///
/// let record = SunlightRecord {
///     date: "2024-03-05".to_string(),
///     sunlight_duration: 5.2,
///     sunlight_duration_normal: 5.8,
///     sunlight_amount: 13.1,
///     sunlight_amount_normal: 12.4,
/// };
/// assert_eq!(record.naive_date().map(|d| d.to_string()), Some("2024-03-05".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunlightRecord {
    /// ISO date key, `YYYY-MM-DD`.
    pub date: String,
    /// Observed sunshine duration in hours.
    pub sunlight_duration: f64,
    /// Climatological normal sunshine duration in hours.
    pub sunlight_duration_normal: f64,
    /// Observed global solar radiation in MJ/m².
    pub sunlight_amount: f64,
    /// Climatological normal global solar radiation in MJ/m².
    pub sunlight_amount_normal: f64,
}

impl SunlightRecord {
    /// Parses the date key, or `None` when the export row did not hold a real date.
    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}
