//! Core library for the `skycast` terminal weather viewer.
//!
//! This crate defines:
//! - Shared domain models (weather reports, positions)
//! - Capability traits over the weather endpoint and location services,
//!   with their HTTP implementations
//! - Pure display mappers (unit conversion, icons, background palette)
//! - The view-owned UI state machine
//!
//! It is used by `skycast-tui`, but can also be reused by other binaries.

pub mod display;
pub mod error;
pub mod locate;
pub mod model;
pub mod source;
pub mod state;

pub use error::{LocationError, WeatherError};
pub use locate::{LocationProvider, ReverseGeocoder, resolve_city};
pub use model::{GeoPosition, WeatherReport};
pub use source::WeatherSource;
pub use state::{FetchState, FetchTicket, TemperatureUnit, Theme, UiState};
