use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{error::LocationError, model::GeoPosition};

use super::LocationProvider;

/// Public IP-geolocation service, queried without a key.
pub const DEFAULT_ENDPOINT: &str = "http://ip-api.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Approximate position from the machine's public IP address. This is the
/// terminal counterpart of a device geolocation query: one shot, coarse, and
/// subject to the service declining the request.
#[derive(Debug, Clone)]
pub struct IpApiLocator {
    base_url: String,
    http: Client,
}

impl IpApiLocator {
    pub fn new(base_url: impl Into<String>) -> Result<Self, LocationError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| {
                tracing::warn!(%err, "failed to build geolocation client");
                LocationError::Unavailable
            })?;

        Ok(Self { base_url: base_url.into(), http })
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

#[async_trait]
impl LocationProvider for IpApiLocator {
    async fn current_position(&self) -> Result<GeoPosition, LocationError> {
        let url = format!("{}/json", self.base_url);

        let res = self.http.get(&url).send().await.map_err(|err| {
            if err.is_timeout() {
                LocationError::Timeout
            } else {
                LocationError::LookupFailed(err.to_string())
            }
        })?;

        let status = res.status();
        if !status.is_success() {
            return Err(LocationError::LookupFailed(format!(
                "geolocation service returned status {status}"
            )));
        }

        let parsed: IpApiResponse = res
            .json()
            .await
            .map_err(|err| LocationError::LookupFailed(err.to_string()))?;

        // The service reports refusals in-band, with a 200 status.
        if parsed.status != "success" {
            return Err(LocationError::Denied);
        }

        match (parsed.lat, parsed.lon) {
            (Some(latitude), Some(longitude)) => Ok(GeoPosition { latitude, longitude }),
            _ => Err(LocationError::LookupFailed(
                "geolocation response missing coordinates".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn successful_lookup_yields_position() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "lat": 48.8566,
                "lon": 2.3522,
            })))
            .mount(&server)
            .await;

        let locator = IpApiLocator::new(server.uri()).unwrap();
        let position = locator.current_position().await.unwrap();

        assert_eq!(position.latitude, 48.8566);
        assert_eq!(position.longitude, 2.3522);
    }

    #[tokio::test]
    async fn in_band_refusal_is_denied() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "fail",
            })))
            .mount(&server)
            .await;

        let locator = IpApiLocator::new(server.uri()).unwrap();
        let err = locator.current_position().await.unwrap_err();

        assert!(matches!(err, LocationError::Denied));
    }

    #[tokio::test]
    async fn non_success_status_is_lookup_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let locator = IpApiLocator::new(server.uri()).unwrap();
        let err = locator.current_position().await.unwrap_err();

        assert!(matches!(err, LocationError::LookupFailed(_)));
    }
}
