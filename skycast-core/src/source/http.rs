use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{error::WeatherError, model::WeatherReport};

use super::WeatherSource;

/// Base URL of the weather endpoint when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// Weather source backed by the `GET <base>/weather?city=<name>` endpoint.
#[derive(Debug, Clone)]
pub struct HttpWeatherSource {
    base_url: String,
    http: Client,
}

impl HttpWeatherSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }
}

impl Default for HttpWeatherSource {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[derive(Debug, Deserialize)]
struct WireReport {
    city: String,
    country: String,
    temperature: f64,
    description: String,
    humidity: u8,
    icon: String,
}

impl From<WireReport> for WeatherReport {
    fn from(wire: WireReport) -> Self {
        WeatherReport {
            city: wire.city,
            country: wire.country,
            temperature_c: wire.temperature,
            description: wire.description,
            humidity_pct: wire.humidity,
            icon: wire.icon,
        }
    }
}

#[async_trait]
impl WeatherSource for HttpWeatherSource {
    async fn current(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let url = format!("{}/weather", self.base_url);

        // The city goes out as a query parameter, so reserved characters are
        // percent-encoded on the wire.
        let res = self.http.get(&url).query(&[("city", city)]).send().await?;

        let status = res.status();
        if !status.is_success() {
            tracing::debug!(%status, city, "weather endpoint returned non-success");
            return Err(WeatherError::CityNotFound);
        }

        let body = res.text().await?;
        let wire: WireReport = serde_json::from_str(&body)
            .map_err(|err| WeatherError::Parse(err.to_string()))?;

        tracing::debug!(city = %wire.city, "weather fetched");
        Ok(wire.into())
    }
}
