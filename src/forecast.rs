use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ForecastError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub datetime: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindForecast {
    pub step: String,
    pub forecast: Vec<ForecastEntry>,
}

/// Forecast document with separate direction and speed series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonWindForecast {
    pub wind_direction: WindForecast,
    pub wind_speed: WindForecast,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub datetime: String,
    pub direction: f64,
    pub speed: f64,
}

/// Joins the speed series onto the direction series by `datetime`. Speed
/// samples without a direction at the same timestamp are dropped; the
/// speed series order is kept.
pub fn parse_forecast(json: &JsonWindForecast) -> Vec<ForecastPoint> {
    let directions: HashMap<&str, f64> = json
        .wind_direction
        .forecast
        .iter()
        .map(|entry| (entry.datetime.as_str(), entry.value))
        .collect();

    let points: Vec<ForecastPoint> = json
        .wind_speed
        .forecast
        .iter()
        .filter_map(|speed| {
            let direction = *directions.get(speed.datetime.as_str())?;
            Some(ForecastPoint {
                datetime: speed.datetime.clone(),
                direction,
                speed: speed.value,
            })
        })
        .collect();
    debug!(
        speeds = json.wind_speed.forecast.len(),
        joined = points.len(),
        "parsed wind forecast"
    );
    points
}

pub fn parse_forecast_str(text: &str) -> Result<Vec<ForecastPoint>, ForecastError> {
    let json: JsonWindForecast = serde_json::from_str(text)?;
    Ok(parse_forecast(&json))
}
