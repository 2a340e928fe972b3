//! Daily run: fetch, chart, notify.

use crate::chart::ChartClient;
use crate::config::Config;
use crate::crawler::Crawler;
use crate::error::SunlightError;
use crate::notify::{Message, Notifier};
use crate::types::date_range::DateRange;
use crate::types::sunlight_record::SunlightRecord;
use log::info;

/// Runs the report against the live portal and chart service.
pub async fn run(config: &Config) -> Result<(), SunlightError> {
    let crawler = Crawler::builder().build()?;
    let chart = ChartClient::builder().build();
    let notifier = Notifier::new(&config.webhook_url);
    run_with(&crawler, &chart, &notifier, &DateRange::from_now()).await?;
    Ok(())
}

/// Fetches `range`, renders the chart and posts the latest day.
///
/// Nothing is posted unless every step before it succeeded. Returns the
/// records that were reported.
pub async fn run_with(
    crawler: &Crawler,
    chart: &ChartClient,
    notifier: &Notifier,
    range: &DateRange,
) -> Result<Vec<SunlightRecord>, SunlightError> {
    let records = crawler.fetch_records_for(range).await?;
    for record in &records {
        info!("{:?}", record);
    }
    let latest = records
        .last()
        .ok_or_else(|| SunlightError::NoRecords(range.to_wire()))?;

    let chart_url = chart.generate(&records).await?;
    info!("Chart: {}", chart_url);

    notifier.send(&Message::for_latest(latest, &chart_url)).await?;
    Ok(records)
}
