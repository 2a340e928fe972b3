//! Slack-style incoming webhook delivery.

pub mod error;

use crate::notify::error::NotifyError;
use crate::types::sunlight_record::SunlightRecord;
use log::{info, warn};
use reqwest::Client;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    pub image_url: String,
    pub title: String,
}

/// Webhook payload: a line of text plus the chart attachment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub text: String,
    pub attachments: Vec<Attachment>,
}

impl Message {
    /// Summarises the latest record and links the chart.
    pub fn for_latest(latest: &SunlightRecord, chart_url: &str) -> Self {
        Self {
            text: format!(
                "{} の日照時間は {} 時間、合計全天日射量は {} MJ/m^2 でした",
                latest.date, latest.sunlight_duration, latest.sunlight_amount
            ),
            attachments: vec![Attachment {
                image_url: chart_url.to_string(),
                title: format!("{} までの日照履歴", latest.date),
            }],
        }
    }
}

pub struct Notifier {
    http: Client,
    // Secret; never logged.
    webhook_url: String,
}

impl Notifier {
    /// An empty URL is accepted here and fails when sending.
    pub fn new(webhook_url: &str) -> Self {
        Self {
            http: Client::new(),
            webhook_url: webhook_url.to_string(),
        }
    }

    pub async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        info!("Posting notification: {}", message.text);
        let response = self
            .http
            .post(&self.webhook_url)
            .json(message)
            .send()
            .await
            .map_err(NotifyError::NetworkRequest)?;

        match response.error_for_status() {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!("Webhook rejected notification: {:?}", e.status());
                Err(match e.status() {
                    Some(status) => NotifyError::HttpStatus { status, source: e },
                    None => NotifyError::NetworkRequest(e),
                })
            }
        }
    }
}
