use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unreadable reply from chart service {0}")]
    InvalidResponse(String, #[source] reqwest::Error),

    #[error("Chart service {0} did not return a chart URL")]
    Rejected(String),
}
