use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Invalid portal URL '{0}'")]
    InvalidUrl(String, #[source] url::ParseError),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    // Connection dropped or decompression failed after the headers arrived
    #[error("Failed to read response body from {0}")]
    BodyRead(String, #[source] reqwest::Error),

    #[error("Failed to encode form body for {0}")]
    FormEncode(String, #[source] serde_urlencoded::ser::Error),

    #[error("Failed to read exported table")]
    TableRead(#[from] csv::Error),
}
