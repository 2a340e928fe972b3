mod chart;
mod config;
mod crawler;
mod error;
mod notify;
mod report;
mod types;

pub use config::{Config, WEBHOOK_URL_ENV};
pub use error::SunlightError;
pub use report::{run, run_with};

pub use crawler::encoding::decode_body;
pub use crawler::form_token::{extract_session_token, TOKEN_FIELD_ID};
pub use crawler::query::*;
pub use crawler::record_assembler::{assemble_record, assemble_records, parse_number};
pub use crawler::session::SessionStore;
pub use crawler::session_client::{Redirects, SessionClient};
pub use crawler::table_parser::{parse_table, RawTableRow, PREAMBLE_ROWS};
pub use crawler::Crawler;

pub use chart::{chart_config, ChartClient};
pub use notify::{Attachment, Message, Notifier};

pub use types::date_range::*;
pub use types::sunlight_record::SunlightRecord;

pub use chart::error::ChartError;
pub use crawler::error::CrawlerError;
pub use notify::error::NotifyError;
