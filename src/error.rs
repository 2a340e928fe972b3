use crate::chart::error::ChartError;
use crate::crawler::error::CrawlerError;
use crate::notify::error::NotifyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SunlightError {
    #[error(transparent)]
    Crawler(#[from] CrawlerError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error("The portal returned no records for {0}")]
    NoRecords(String),
}
