//! Per-run cookie jar.
//!
//! The portal ties the query to the visit through a session cookie, so every
//! `Set-Cookie` received is kept here and replayed on later requests. The jar
//! is handed to the HTTP clients as their cookie provider, which also captures
//! cookies set on intermediate redirect hops. It lives for one fetch sequence
//! and is never persisted.

use log::debug;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use reqwest::Url;
use std::iter;
use std::sync::Arc;

/// Cookies received during one session, keyed by name + domain + path.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    jar: Arc<Jar>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle for `ClientBuilder::cookie_provider`.
    pub(crate) fn jar(&self) -> Arc<Jar> {
        Arc::clone(&self.jar)
    }

    /// Stores the cookie described by a `Set-Cookie` header value received from `url`.
    ///
    /// A cookie with the same name, domain and path replaces the stored one. An
    /// already expired cookie removes its stored counterpart. Headers that do
    /// not parse, or whose `Domain` does not cover the responding host, are
    /// ignored.
    pub fn record_set_cookie(&self, url: &Url, header_value: &str) {
        match HeaderValue::from_str(header_value) {
            Ok(value) => self.jar.set_cookies(&mut iter::once(&value), url),
            Err(_) => debug!("Ignoring non-text Set-Cookie from {}", url),
        }
    }

    /// Builds the `Cookie` header value for a request to `url`.
    ///
    /// Only cookies whose domain and path cover `url` and that have not expired
    /// are included. Returns `None` when nothing applies.
    pub fn cookie_header_for(&self, url: &Url) -> Option<String> {
        self.jar
            .cookies(url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }
}
