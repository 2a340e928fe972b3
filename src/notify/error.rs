use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Network request failed for webhook")]
    NetworkRequest(#[source] reqwest::Error),

    #[error("Webhook request failed with status {status}")]
    HttpStatus {
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },
}
