use log::debug;
use std::env;

/// Environment variable holding the notification webhook URL.
pub const WEBHOOK_URL_ENV: &str = "SLACK_WEBHOOK_URL";

/// Process configuration, read once at start-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Incoming-webhook URL. Empty when unset; not validated here.
    pub webhook_url: String,
}

impl Config {
    /// Loads `.env` if present, then reads the environment.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) => debug!("No .env loaded: {}", e),
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            webhook_url: lookup(WEBHOOK_URL_ENV).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_webhook_is_empty() {
        assert_eq!(Config::from_lookup(|_| None).webhook_url, "");
    }

    #[test]
    fn test_webhook_from_lookup() {
        let config = Config::from_lookup(|key| {
            (key == WEBHOOK_URL_ENV).then(|| "https://hooks.slack.com/services/T/B/X".to_string())
        });
        assert_eq!(config.webhook_url, "https://hooks.slack.com/services/T/B/X");
    }
}
