use crate::crawler::table_parser::RawTableRow;
use crate::types::sunlight_record::SunlightRecord;

/// Converts parsed rows into records, preserving row order.
pub fn assemble_records(rows: &[RawTableRow]) -> Vec<SunlightRecord> {
    rows.iter().map(assemble_record).collect()
}

/// Builds one record. Cells that do not start with a number become `NaN`;
/// the row itself is always kept.
pub fn assemble_record(row: &RawTableRow) -> SunlightRecord {
    SunlightRecord {
        date: format!("{}-{:0>2}-{:0>2}", row.year, row.month, row.day),
        sunlight_duration: parse_number(&row.sunlight_duration),
        sunlight_duration_normal: parse_number(&row.sunlight_duration_normal),
        sunlight_amount: parse_number(&row.sunlight_amount),
        sunlight_amount_normal: parse_number(&row.sunlight_amount_normal),
    }
}

/// Parses the longest numeric prefix of `cell` after leading whitespace,
/// so `"12.3)"` reads as `12.3`. Returns `NaN` when there is no number.
pub fn parse_number(cell: &str) -> f64 {
    let trimmed = cell.trim_start();
    let end = numeric_prefix_len(trimmed.as_bytes());
    trimmed[..end].parse().unwrap_or(f64::NAN)
}

fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let integer = digits_from(end);
    end += integer;
    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if integer > 0 || fraction > 0 {
            end += 1 + fraction;
        }
    }
    if integer == 0 && fraction == 0 {
        return 0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exponent = digits_from(exp_end);
        if exponent > 0 {
            end = exp_end + exponent;
        }
    }
    end
}
