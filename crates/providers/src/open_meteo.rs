//! Open-Meteo forecast adapter
//!
//! Open-Meteo needs no API key. Current temperature and humidity come from the
//! `current` block; seasonal rainfall is projected from the daily precipitation
//! forecast because the engine scores crops against whole-season totals.

use std::time::Duration;

use async_trait::async_trait;
use krishi_core::{LocationRef, ProviderError, SignalProvider, WeatherFragment};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::http::fetch_body;

pub const PROVIDER_NAME: &str = "open_meteo";

pub const FORECAST_DAYS: u32 = 16;

/// Length of the growing season the daily forecast is projected onto.
pub const SEASON_DAYS: f64 = 120.0;

#[derive(Clone, Debug)]
pub struct OpenMeteoProvider {
    client: Client,
    base_url: String,
}

impl OpenMeteoProvider {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }
}

#[async_trait]
impl SignalProvider<WeatherFragment> for OpenMeteoProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch(
        &self,
        location: &LocationRef,
        budget: Duration,
    ) -> Result<WeatherFragment, ProviderError> {
        let Some((latitude, longitude)) = location.coordinates() else {
            return Err(ProviderError::unavailable(
                PROVIDER_NAME,
                format!("location `{}` has no coordinates", location.name),
            ));
        };

        let request = self.client.get(&self.base_url).query(&[
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current", "temperature_2m,relative_humidity_2m".to_string()),
            ("daily", "precipitation_sum".to_string()),
            ("forecast_days", FORECAST_DAYS.to_string()),
            ("timezone", "auto".to_string()),
        ]);

        let body = fetch_body(PROVIDER_NAME, request, budget).await?;
        let fragment = parse_forecast(&body)?;
        debug!(
            provider = PROVIDER_NAME,
            location = %location.name,
            temperature = ?fragment.temperature,
            rainfall_mm = ?fragment.rainfall_mm,
            "weather fetched"
        );
        Ok(fragment)
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current: Option<CurrentBlock>,
    #[serde(default)]
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
}

pub fn parse_forecast(body: &str) -> Result<WeatherFragment, ProviderError> {
    let response: ForecastResponse = serde_json::from_str(body)
        .map_err(|error| ProviderError::invalid_response(PROVIDER_NAME, error.to_string()))?;

    let (temperature, humidity) = match response.current {
        Some(current) => (
            current.temperature_2m.filter(|value| value.is_finite()),
            current.relative_humidity_2m.filter(|value| (0.0..=100.0).contains(value)),
        ),
        None => (None, None),
    };
    let rainfall_mm =
        response.daily.and_then(|daily| seasonal_rainfall(&daily.precipitation_sum));

    if temperature.is_none() && humidity.is_none() && rainfall_mm.is_none() {
        return Err(ProviderError::invalid_response(PROVIDER_NAME, "forecast carried no readings"));
    }

    Ok(WeatherFragment { temperature, humidity, rainfall_mm })
}

/// Mean daily precipitation over the reported days, scaled to a season.
pub fn seasonal_rainfall(daily: &[Option<f64>]) -> Option<f64> {
    let readings: Vec<f64> =
        daily.iter().flatten().copied().filter(|mm| mm.is_finite() && *mm >= 0.0).collect();
    if readings.is_empty() {
        return None;
    }
    let mean = readings.iter().sum::<f64>() / readings.len() as f64;
    Some(mean * SEASON_DAYS)
}
