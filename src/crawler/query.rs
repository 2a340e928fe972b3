//! Wire constants for the JMA observation download portal (`obsdl`).
//!
//! The table endpoint replays the browser form post. Field names and values are
//! fixed by the portal and sent verbatim.

use crate::types::date_range::DateRange;

/// Base of the download portal; relative paths below are resolved against it.
pub const PORTAL_BASE_URL: &str = "https://www.data.jma.go.jp/risk/obsdl/";
/// Landing page holding the session token form.
pub const FORM_PAGE_PATH: &str = "index.php";
/// Table export endpoint.
pub const TABLE_PATH: &str = "show/table";

/// Form field that echoes the session token.
pub const TOKEN_FORM_FIELD: &str = "PHPSESSID";

/// Tokyo (47662).
pub const DEFAULT_STATION: &str = "s47662";
/// Daily aggregation.
pub const AGGREGATION_DAILY: &str = "1";
/// Sunshine duration (401) and global solar radiation (610).
pub const ELEMENT_LIST: &str = r#"[["401",""],["610",""]]"#;

/// Builds the query fields for the table export, token excluded.
pub fn table_query(station: &str, range: &DateRange) -> Vec<(String, String)> {
    let station_list = format!(r#"["{}"]"#, station);
    let ymd_list = range.to_wire();
    [
        ("stationNumList", station_list.as_str()),
        ("aggrgPeriod", AGGREGATION_DAILY),
        ("elementNumList", ELEMENT_LIST),
        ("interAnnualFlag", "1"),
        ("ymdList", ymd_list.as_str()),
        ("optionNumList", r#"[["op1",0]]"#),
        ("downloadFlag", "true"),
        ("rmkFlag", "0"),
        ("disconnectFlag", "0"),
        ("youbiFlag", "0"),
        ("fukenFlag", "0"),
        ("kijiFlag", "0"),
        ("huukouFlag", "0"),
        ("csvFlag", "1"),
        ("jikantaiFlag", "0"),
        ("jikantaiList", "[]"),
        ("ymdLiteral", "0"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}
