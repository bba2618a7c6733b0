use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::WeatherError, model::WeatherReport};

pub mod http;

/// Capability interface over the weather endpoint, injected into the view so
/// the fetch flow can run in tests without a network.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Current conditions for a city. Callers guarantee a non-empty name;
    /// the view treats empty input as a no-op before reaching this.
    async fn current(&self, city: &str) -> Result<WeatherReport, WeatherError>;
}
