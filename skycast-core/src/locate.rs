//! Location resolution: a position provider plus a reverse geocoder.
//!
//! Both sides are capability traits so the startup flow can be exercised in
//! tests without a device or a network.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::LocationError, model::GeoPosition};

pub mod ip_api;
pub mod nominatim;

/// Single current-position query, not a continuous watch.
#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    async fn current_position(&self) -> Result<GeoPosition, LocationError>;
}

/// Turns coordinates into a city-like name.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync + Debug {
    /// `Ok(None)` means the position resolved but carries no usable name;
    /// callers stay silent in that case.
    async fn city_name(&self, position: GeoPosition) -> Result<Option<String>, LocationError>;
}

/// Resolve the user's city: position first, then reverse geocoding.
pub async fn resolve_city(
    provider: &dyn LocationProvider,
    geocoder: &dyn ReverseGeocoder,
) -> Result<Option<String>, LocationError> {
    let position = provider.current_position().await?;
    tracing::debug!(lat = position.latitude, lon = position.longitude, "position resolved");
    geocoder.city_name(position).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FixedProvider(GeoPosition);

    #[async_trait]
    impl LocationProvider for FixedProvider {
        async fn current_position(&self) -> Result<GeoPosition, LocationError> {
            Ok(self.0)
        }
    }

    #[derive(Debug)]
    struct FailingProvider;

    #[async_trait]
    impl LocationProvider for FailingProvider {
        async fn current_position(&self) -> Result<GeoPosition, LocationError> {
            Err(LocationError::Denied)
        }
    }

    #[derive(Debug)]
    struct FixedGeocoder(Option<String>);

    #[async_trait]
    impl ReverseGeocoder for FixedGeocoder {
        async fn city_name(&self, _position: GeoPosition) -> Result<Option<String>, LocationError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn resolves_position_then_name() {
        let provider = FixedProvider(GeoPosition { latitude: 48.85, longitude: 2.35 });
        let geocoder = FixedGeocoder(Some("Paris".to_string()));

        let city = resolve_city(&provider, &geocoder).await.unwrap();
        assert_eq!(city.as_deref(), Some("Paris"));
    }

    #[tokio::test]
    async fn provider_failure_short_circuits() {
        let geocoder = FixedGeocoder(Some("Paris".to_string()));
        let err = resolve_city(&FailingProvider, &geocoder).await.unwrap_err();
        assert!(matches!(err, LocationError::Denied));
    }

    #[tokio::test]
    async fn nameless_position_resolves_to_none() {
        let provider = FixedProvider(GeoPosition { latitude: 0.0, longitude: 0.0 });
        let geocoder = FixedGeocoder(None);

        let city = resolve_city(&provider, &geocoder).await.unwrap();
        assert!(city.is_none());
    }
}
