//! Stateful client for the JMA observation download portal.
//!
//! A fetch is a two-step conversation: GET the landing page to obtain the
//! session cookie and the hidden `sid` token, then POST the table query
//! carrying both. The CSV reply is decoded, trimmed of its preamble and
//! turned into [`SunlightRecord`]s.

pub mod encoding;
pub mod error;
pub mod form_token;
pub mod query;
pub mod record_assembler;
pub mod session;
pub mod session_client;
pub mod table_parser;

use crate::crawler::error::CrawlerError;
use crate::crawler::form_token::extract_session_token;
use crate::crawler::query::{table_query, DEFAULT_STATION, FORM_PAGE_PATH, PORTAL_BASE_URL, TABLE_PATH};
use crate::crawler::record_assembler::assemble_records;
use crate::crawler::session_client::SessionClient;
use crate::crawler::table_parser::parse_table;
use crate::types::date_range::DateRange;
use crate::types::sunlight_record::SunlightRecord;
use bon::bon;
use log::{debug, info};
use reqwest::Url;

/// Fetches sunshine records for one station.
///
/// # Examples
///
/// ```no_run
/// # use jma_sunlight::{Crawler, CrawlerError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), CrawlerError> {
/// let crawler = Crawler::builder().build()?;
/// let records = crawler.fetch_records().await?;
/// for record in &records {
///     println!("{} {:.1} h", record.date, record.sunlight_duration);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Crawler {
    form_url: Url,
    table_url: Url,
    station: String,
}

#[bon]
impl Crawler {
    /// Creates a crawler.
    ///
    /// * `.base_url(&str)`: Optional. Portal root ending in `/`. Defaults to [`PORTAL_BASE_URL`].
    /// * `.station(&str)`: Optional. Station code as the form expects it. Defaults to [`DEFAULT_STATION`].
    ///
    /// # Errors
    ///
    /// Returns [`CrawlerError::InvalidUrl`] if the base URL cannot be parsed.
    #[builder]
    pub fn new(base_url: Option<&str>, station: Option<&str>) -> Result<Self, CrawlerError> {
        let base_url = base_url.unwrap_or(PORTAL_BASE_URL);
        let base = Url::parse(base_url)
            .map_err(|e| CrawlerError::InvalidUrl(base_url.to_string(), e))?;
        let join = |path: &str| {
            base.join(path)
                .map_err(|e| CrawlerError::InvalidUrl(format!("{}{}", base, path), e))
        };
        Ok(Self {
            form_url: join(FORM_PAGE_PATH)?,
            table_url: join(TABLE_PATH)?,
            station: station.unwrap_or(DEFAULT_STATION).to_string(),
        })
    }

    /// Fetches the trailing window ending yesterday (local time).
    pub async fn fetch_records(&self) -> Result<Vec<SunlightRecord>, CrawlerError> {
        self.fetch_records_for(&DateRange::from_now()).await
    }

    /// Fetches the given window with a fresh session.
    ///
    /// A missing token does not stop the query; the portal's reply is parsed
    /// whatever it is, so a rejected query shows up as few or no records.
    pub async fn fetch_records_for(
        &self,
        range: &DateRange,
    ) -> Result<Vec<SunlightRecord>, CrawlerError> {
        let mut client = SessionClient::new()?;

        let form_page = client.fetch_page(&self.form_url).await?;
        client.set_token(extract_session_token(&form_page));
        debug!(
            "Session token {:?}, cookies for query: {}",
            client.token(),
            client.session().cookie_header_for(&self.table_url).is_some()
        );

        info!("Querying station {} for {}", self.station, range);
        let export = client
            .submit_form(&self.table_url, table_query(&self.station, range))
            .await?;

        let rows = parse_table(&export)?;
        let records = assemble_records(&rows);
        info!("Parsed {} record(s) for station {}", records.len(), self.station);
        Ok(records)
    }
}
