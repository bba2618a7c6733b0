use serde::{Deserialize, Serialize};

/// Current conditions for one city, as shown to the user.
///
/// Replaced wholesale on every successful fetch; a failed fetch drops it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub temperature_c: f64,
    pub description: String,
    pub humidity_pct: u8,
    pub icon: String,
}

/// A point on the globe, in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}
