use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{error::LocationError, model::GeoPosition};

use super::ReverseGeocoder;

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// Nominatim's usage policy requires an identifying User-Agent.
const USER_AGENT: &str = "skycast/0.1 (terminal weather viewer)";

/// Reverse geocoder backed by OpenStreetMap Nominatim.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    http: Client,
}

impl NominatimGeocoder {
    pub fn new(base_url: impl Into<String>) -> Result<Self, LocationError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| LocationError::LookupFailed(err.to_string()))?;

        Ok(Self { base_url: base_url.into(), http })
    }
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    state: Option<String>,
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn city_name(&self, position: GeoPosition) -> Result<Option<String>, LocationError> {
        let url = format!("{}/reverse", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", position.latitude.to_string()),
                ("lon", position.longitude.to_string()),
            ])
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    LocationError::Timeout
                } else {
                    LocationError::LookupFailed(err.to_string())
                }
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(LocationError::LookupFailed(format!(
                "reverse geocoder returned status {status}"
            )));
        }

        let parsed: NominatimResponse = res
            .json()
            .await
            .map_err(|err| LocationError::LookupFailed(err.to_string()))?;

        // City beats town beats state; no usable field is not an error.
        let name = parsed
            .address
            .and_then(|addr| addr.city.or(addr.town).or(addr.state));

        if let Some(name) = &name {
            tracing::debug!(city = %name, "reverse geocoded");
        }
        Ok(name)
    }
}
