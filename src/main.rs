use jma_sunlight::{Config, SunlightError};
use log::LevelFilter;

#[tokio::main]
async fn main() -> Result<(), SunlightError> {
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = Config::from_env();
    jma_sunlight::run(&config).await
}
