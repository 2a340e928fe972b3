//! Reader for the portal's CSV export.
//!
//! The export opens with a fixed preamble (download timestamp, a blank line,
//! station names, element names, normal/quality captions) followed by one row
//! per day. Row widths vary, so the reader is flexible and maps fields purely
//! by position.

use crate::crawler::error::CrawlerError;
use csv::{ReaderBuilder, StringRecord};
use log::debug;

/// Lines of title/header/metadata at the top of every export. Blank lines count.
pub const PREAMBLE_ROWS: usize = 6;

/// Positional layout of a data row.
const YEAR: usize = 0;
const MONTH: usize = 1;
const DAY: usize = 2;
const SUNLIGHT_DURATION: usize = 3;
// 4: duration quality flag
const SUNLIGHT_DURATION_NORMAL: usize = 5;
// 6: normal duration quality flag
const SUNLIGHT_AMOUNT: usize = 7;
const SUNLIGHT_AMOUNT_NORMAL: usize = 8;

/// One data row of the export, still as text.
///
/// Missing trailing fields are empty strings. The quality-flag columns that sit
/// between the duration values are not kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTableRow {
    pub year: String,
    pub month: String,
    pub day: String,
    pub sunlight_duration: String,
    pub sunlight_duration_normal: String,
    pub sunlight_amount: String,
    pub sunlight_amount_normal: String,
}

impl RawTableRow {
    fn from_record(record: &StringRecord) -> Self {
        let field = |index: usize| record.get(index).unwrap_or_default().to_string();
        Self {
            year: field(YEAR),
            month: field(MONTH),
            day: field(DAY),
            sunlight_duration: field(SUNLIGHT_DURATION),
            sunlight_duration_normal: field(SUNLIGHT_DURATION_NORMAL),
            sunlight_amount: field(SUNLIGHT_AMOUNT),
            sunlight_amount_normal: field(SUNLIGHT_AMOUNT_NORMAL),
        }
    }
}

/// Parses the decoded export and returns every row after the preamble.
///
/// The first [`PREAMBLE_ROWS`] lines are dropped unconditionally, whatever
/// they contain. Rows that are shorter or longer than nine fields are accepted;
/// blank lines after the preamble are skipped and logged.
pub fn parse_table(text: &str) -> Result<Vec<RawTableRow>, CrawlerError> {
    let body = skip_lines(text, PREAMBLE_ROWS);
    let blank = blank_lines(body);
    if blank > 0 {
        debug!("Skipping {} blank line(s) after the preamble", blank);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        rows.push(RawTableRow::from_record(&result?));
    }
    Ok(rows)
}

/// Cuts `count` physical lines off the front of `text`. The CSV reader
/// ignores blank lines, so the preamble is removed before it sees the text.
fn skip_lines(text: &str, count: usize) -> &str {
    let mut rest = text;
    for _ in 0..count {
        match rest.find('\n') {
            Some(index) => rest = &rest[index + 1..],
            None => return "",
        }
    }
    rest
}

/// Empty lines the CSV reader will pass over without yielding a record.
fn blank_lines(text: &str) -> usize {
    text.lines().filter(|line| line.is_empty()).count()
}
