//! View-owned UI state.
//!
//! The loading/error/weather triad is one tagged [`FetchState`], so a settled
//! fetch can never leave both an error message and a weather report behind.
//! Overlapping fetches are disambiguated with a generation token: every fetch
//! bumps the generation, and a settle carrying a stale generation is ignored.

use crate::error::{LocationError, WeatherError};
use crate::model::WeatherReport;

const FETCH_FAILED_MSG: &str = "Could not fetch weather for that city.";
const LOCATION_FAILED_MSG: &str = "Failed to detect location.";

/// Temperature unit the view renders in. The stored report stays Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn toggled(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Lifecycle of the current weather lookup.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading {
        generation: u64,
    },
    Ready(WeatherReport),
    Failed(String),
}

/// Handle for one in-flight fetch, passed back into [`UiState::settle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub city: String,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub city_input: String,
    pub fetch: FetchState,
    pub unit: TemperatureUnit,
    pub theme: Theme,
    generation: u64,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch for the current input. Empty input is a no-op, not an
    /// error: no ticket is issued and nothing changes.
    pub fn submit(&mut self) -> Option<FetchTicket> {
        if self.city_input.is_empty() {
            return None;
        }

        self.generation += 1;
        self.fetch = FetchState::Loading { generation: self.generation };

        Some(FetchTicket { generation: self.generation, city: self.city_input.clone() })
    }

    /// Fill the input with a resolved city name and start a fetch for it.
    /// Used by the location path; typing goes through `city_input` directly.
    pub fn fetch_city(&mut self, city: impl Into<String>) -> Option<FetchTicket> {
        self.city_input = city.into();
        self.submit()
    }

    /// Apply a settled fetch. Whatever the outcome, the loading state ends
    /// here; a stale generation (a newer fetch has started since) is dropped.
    pub fn settle(&mut self, generation: u64, outcome: Result<WeatherReport, WeatherError>) {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "dropping stale settle");
            return;
        }

        self.fetch = match outcome {
            Ok(report) => FetchState::Ready(report),
            Err(err) => {
                tracing::warn!(%err, "weather fetch failed");
                FetchState::Failed(FETCH_FAILED_MSG.to_string())
            }
        };
    }

    /// Surface a location-detection failure, unless a fetch is already in
    /// flight (its settle would overwrite the message immediately anyway).
    pub fn location_failed(&mut self, err: &LocationError) {
        if matches!(self.fetch, FetchState::Loading { .. }) {
            return;
        }

        let message = match err {
            LocationError::Unavailable => err.to_string(),
            _ => LOCATION_FAILED_MSG.to_string(),
        };
        self.fetch = FetchState::Failed(message);
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.fetch, FetchState::Loading { .. })
    }

    pub fn weather(&self) -> Option<&WeatherReport> {
        match &self.fetch {
            FetchState::Ready(report) => Some(report),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.fetch {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Temperature of a report in the selected unit.
    pub fn display_temperature(&self, report: &WeatherReport) -> f64 {
        match self.unit {
            TemperatureUnit::Celsius => report.temperature_c,
            TemperatureUnit::Fahrenheit => crate::display::to_fahrenheit(report.temperature_c),
        }
    }

    pub fn toggle_unit(&mut self) {
        self.unit = self.unit.toggled();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(city: &str) -> WeatherReport {
        WeatherReport {
            city: city.to_string(),
            country: "FR".to_string(),
            temperature_c: 21.0,
            description: "clear sky".to_string(),
            humidity_pct: 40,
            icon: "01d".to_string(),
        }
    }

    #[test]
    fn empty_input_is_a_no_op() {
        let mut state = UiState::new();
        assert!(state.submit().is_none());
        assert_eq!(state.fetch, FetchState::Idle);
    }

    #[test]
    fn submit_enters_loading_and_settle_ends_it() {
        let mut state = UiState::new();
        state.city_input = "Paris".to_string();

        let ticket = state.submit().expect("non-empty input must issue a ticket");
        assert!(state.is_loading());

        state.settle(ticket.generation, Ok(report("Paris")));
        assert!(!state.is_loading());
        assert_eq!(state.weather().map(|w| w.city.as_str()), Some("Paris"));
    }

    #[test]
    fn failed_fetch_clears_weather_and_sets_message() {
        let mut state = UiState::new();
        let first = state.fetch_city("Paris").unwrap();
        state.settle(first.generation, Ok(report("Paris")));

        let second = state.submit().unwrap();
        state.settle(second.generation, Err(WeatherError::CityNotFound));

        assert!(!state.is_loading());
        assert!(state.weather().is_none());
        assert_eq!(state.error_message(), Some("Could not fetch weather for that city."));
    }

    #[test]
    fn success_after_failure_clears_the_error() {
        let mut state = UiState::new();
        let first = state.fetch_city("Nowhere").unwrap();
        state.settle(first.generation, Err(WeatherError::CityNotFound));
        assert!(state.error_message().is_some());

        let second = state.fetch_city("Paris").unwrap();
        state.settle(second.generation, Ok(report("Paris")));

        assert!(state.error_message().is_none());
        assert!(state.weather().is_some());
    }

    #[test]
    fn stale_settle_is_ignored() {
        let mut state = UiState::new();
        let paris = state.fetch_city("Paris").unwrap();
        let tokyo = state.fetch_city("Tokyo").unwrap();

        // Tokyo settles first, then the older Paris response straggles in.
        state.settle(tokyo.generation, Ok(report("Tokyo")));
        state.settle(paris.generation, Ok(report("Paris")));

        assert_eq!(state.weather().map(|w| w.city.as_str()), Some("Tokyo"));
    }

    #[test]
    fn stale_failure_does_not_clobber_newer_success() {
        let mut state = UiState::new();
        let first = state.fetch_city("Paris").unwrap();
        let second = state.fetch_city("Tokyo").unwrap();

        state.settle(second.generation, Ok(report("Tokyo")));
        state.settle(first.generation, Err(WeatherError::CityNotFound));

        assert!(state.error_message().is_none());
        assert_eq!(state.weather().map(|w| w.city.as_str()), Some("Tokyo"));
    }

    #[test]
    fn location_failure_maps_to_generic_message() {
        let mut state = UiState::new();
        state.location_failed(&LocationError::LookupFailed("boom".into()));
        assert_eq!(state.error_message(), Some("Failed to detect location."));

        state.location_failed(&LocationError::Unavailable);
        assert_eq!(state.error_message(), Some("Geolocation not supported"));
    }

    #[test]
    fn location_failure_is_ignored_while_loading() {
        let mut state = UiState::new();
        let _ticket = state.fetch_city("Paris").unwrap();

        state.location_failed(&LocationError::Timeout);
        assert!(state.is_loading());
    }

    #[test]
    fn unit_toggle_converts_display_temperature() {
        let mut state = UiState::new();
        let r = report("Paris");
        assert_eq!(state.display_temperature(&r), 21.0);

        state.toggle_unit();
        assert_eq!(state.display_temperature(&r), 69.8);

        state.toggle_unit();
        assert_eq!(state.display_temperature(&r), 21.0);
    }
}
