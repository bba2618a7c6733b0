/// Failures while resolving the user's location.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Geolocation not supported")]
    Unavailable,
    #[error("Location permission denied")]
    Denied,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location lookup failed: {0}")]
    LookupFailed(String),
}

/// Failures while fetching weather for a city.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("City not found")]
    CityNotFound,
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}
