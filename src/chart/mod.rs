//! Chart rendering through a QuickChart-compatible service.
//!
//! The service takes a Chart.js (v2) configuration and answers with a short
//! URL to the rendered PNG, which is what the notification links to.

pub mod error;

use crate::chart::error::ChartError;
use crate::types::sunlight_record::SunlightRecord;
use bon::bon;
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

pub const QUICKCHART_CREATE_URL: &str = "https://quickchart.io/chart/create";
pub const CHART_WIDTH: u32 = 1000;
pub const CHART_HEIGHT: u32 = 600;

/// Lowest upper bound of the radiation axis, MJ/m².
const RADIATION_AXIS_FLOOR: f64 = 19.0;
/// Lowest upper bound of the duration axis, hours.
const DURATION_AXIS_FLOOR: f64 = 11.0;

const RADIATION_COLOR: &str = "rgba(235, 162, 54, 1)";
const DURATION_COLOR: &str = "rgba(255, 206, 86, 1)";
const NORMAL_RADIATION_COLOR: &str = "rgba(235, 162, 54, 0.4)";
const NORMAL_DURATION_COLOR: &str = "rgba(255, 206, 86, 0.4)";

#[derive(Debug, Deserialize)]
struct CreateResponse {
    success: bool,
    url: Option<String>,
}

pub struct ChartClient {
    http: Client,
    endpoint: String,
}

#[bon]
impl ChartClient {
    /// * `.endpoint(&str)`: Optional. Chart creation URL. Defaults to [`QUICKCHART_CREATE_URL`].
    #[builder]
    pub fn new(endpoint: Option<&str>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.unwrap_or(QUICKCHART_CREATE_URL).to_string(),
        }
    }

    /// Renders the dual-axis chart for `records` and returns its short URL.
    pub async fn generate(&self, records: &[SunlightRecord]) -> Result<String, ChartError> {
        let body = json!({
            "backgroundColor": "transparent",
            "width": CHART_WIDTH,
            "height": CHART_HEIGHT,
            "devicePixelRatio": 1.0,
            "format": "png",
            "chart": chart_config(records),
        });

        info!("Requesting chart for {} record(s) from {}", records.len(), self.endpoint);
        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChartError::NetworkRequest(self.endpoint.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", self.endpoint, e);
                return Err(match e.status() {
                    Some(status) => ChartError::HttpStatus {
                        url: self.endpoint.clone(),
                        status,
                        source: e,
                    },
                    None => ChartError::NetworkRequest(self.endpoint.clone(), e),
                });
            }
        };

        let reply: CreateResponse = response
            .json()
            .await
            .map_err(|e| ChartError::InvalidResponse(self.endpoint.clone(), e))?;
        match reply {
            CreateResponse {
                success: true,
                url: Some(url),
            } => Ok(url),
            _ => Err(ChartError::Rejected(self.endpoint.clone())),
        }
    }
}

/// Builds the Chart.js configuration: radiation on the left axis, duration on
/// the right, observed values as thin lines and normals as wide faded bands.
pub fn chart_config(records: &[SunlightRecord]) -> Value {
    let labels: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
    let series = |pick: fn(&SunlightRecord) -> f64| records.iter().map(pick).collect::<Vec<f64>>();
    let amount = series(|r| r.sunlight_amount);
    let duration = series(|r| r.sunlight_duration);
    let amount_normal = series(|r| r.sunlight_amount_normal);
    let duration_normal = series(|r| r.sunlight_duration_normal);

    let radiation_max = axis_max(RADIATION_AXIS_FLOOR, amount.iter().chain(&amount_normal));
    let duration_max = axis_max(DURATION_AXIS_FLOOR, duration.iter().chain(&duration_normal));

    json!({
        "type": "line",
        "data": {
            "labels": labels,
            "datasets": [
                {
                    "label": "Radiation",
                    "data": amount,
                    "borderColor": RADIATION_COLOR,
                    "borderWidth": 8,
                    "fill": false,
                    "yAxisID": "y1",
                },
                {
                    "label": "Duration",
                    "data": duration,
                    "borderColor": DURATION_COLOR,
                    "borderWidth": 4,
                    "fill": false,
                    "yAxisID": "y2",
                },
                {
                    "label": "Normal Radiation",
                    "data": amount_normal,
                    "borderColor": NORMAL_RADIATION_COLOR,
                    "borderWidth": 20,
                    "yAxisID": "y1",
                    "fill": false,
                    "pointRadius": 0,
                },
                {
                    "label": "Normal Duration",
                    "data": duration_normal,
                    "borderColor": NORMAL_DURATION_COLOR,
                    "borderWidth": 20,
                    "yAxisID": "y2",
                    "fill": false,
                    "pointRadius": 0,
                },
            ],
        },
        "options": {
            "scales": {
                "yAxes": [
                    {
                        "id": "y1",
                        "display": true,
                        "position": "left",
                        "gridLines": { "drawOnChartArea": false },
                        "labelString": "MJ/m^2",
                        "ticks": {
                            "min": 0,
                            "max": radiation_max,
                            "fontSize": 20,
                            "fontStyle": "bold",
                        },
                    },
                    {
                        "id": "y2",
                        "display": true,
                        "position": "right",
                        "labelString": "Hours",
                        "ticks": {
                            "min": 0,
                            "max": duration_max,
                            "fontSize": 20,
                            "fontStyle": "bold",
                        },
                    },
                ],
            },
        },
    })
}

/// `ceil(max(floor, values)) + 1`, ignoring NaN gaps.
fn axis_max<'a>(floor: f64, values: impl IntoIterator<Item = &'a f64>) -> f64 {
    values.into_iter().copied().fold(floor, f64::max).ceil() + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, duration: f64, amount: f64) -> SunlightRecord {
        SunlightRecord {
            date: date.to_string(),
            sunlight_duration: duration,
            sunlight_duration_normal: 5.5,
            sunlight_amount: amount,
            sunlight_amount_normal: 12.0,
        }
    }

    #[test]
    fn test_axis_max_uses_floor_when_values_are_small() {
        assert_eq!(axis_max(19.0, &[3.0, 12.0]), 20.0);
        assert_eq!(axis_max(11.0, &[0.0; 0]), 12.0);
    }

    #[test]
    fn test_axis_max_rounds_up_large_values() {
        assert_eq!(axis_max(19.0, &[21.2, 3.0]), 23.0);
        assert_eq!(axis_max(11.0, &[12.0]), 13.0);
    }

    #[test]
    fn test_axis_max_ignores_nan() {
        assert_eq!(axis_max(11.0, &[f64::NAN, 11.5]), 13.0);
    }

    #[test]
    fn test_chart_config_layout() {
        let records = [
            record("2024-03-05", 5.2, 13.1),
            record("2024-03-06", 12.4, f64::NAN),
        ];
        let config = chart_config(&records);

        assert_eq!(config["type"], "line");
        assert_eq!(config["data"]["labels"], json!(["2024-03-05", "2024-03-06"]));

        let datasets = config["data"]["datasets"].as_array().unwrap();
        let labels: Vec<_> = datasets.iter().map(|d| d["label"].as_str().unwrap()).collect();
        assert_eq!(
            labels,
            ["Radiation", "Duration", "Normal Radiation", "Normal Duration"]
        );
        assert_eq!(datasets[0]["data"], json!([13.1, null]));
        assert_eq!(datasets[1]["yAxisID"], "y2");
        assert_eq!(datasets[2]["pointRadius"], 0);
        assert_eq!(datasets[3]["borderWidth"], 20);

        let axes = config["options"]["scales"]["yAxes"].as_array().unwrap();
        assert_eq!(axes[0]["position"], "left");
        assert_eq!(axes[0]["ticks"]["max"], 20.0);
        assert_eq!(axes[1]["position"], "right");
        assert_eq!(axes[1]["ticks"]["max"], 14.0);
    }
}
