//! Session token lookup in the portal's landing page.

use log::warn;
use scraper::{Html, Selector};

/// `id` of the hidden input carrying the session token.
pub const TOKEN_FIELD_ID: &str = "sid";

/// Returns the value of the first `<input id="sid">` in `html`.
///
/// A missing field, or one with an empty or absent `value`, yields `None`; the
/// caller then submits the query without a token.
pub fn extract_session_token(html: &str) -> Option<String> {
    let selector = Selector::parse(&format!("input#{}", TOKEN_FIELD_ID)).ok()?;
    let document = Html::parse_document(html);
    let token = document
        .select(&selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .filter(|value| !value.is_empty())
        .map(str::to_string);
    if token.is_none() {
        warn!("No session token field #{} in form page", TOKEN_FIELD_ID);
    }
    token
}
