//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The WeatherAPI.com client behind the `WeatherProvider` trait
//! - Shared domain models (locations, conditions, forecasts)
//! - Pure reshaping of forecasts into chart series, radar values and table rows
//!
//! It is used by `weather-dashboard`, but can also be reused by other binaries or services.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod provider;
pub mod radar;
pub mod series;
pub mod table;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use dashboard::{Dashboard, DashboardRequest, Sections, fetch_dashboard};
pub use error::{FailureKind, FetchError};
pub use model::{CurrentConditions, CurrentWeather, Forecast, ForecastDay, HourSample, Location};
pub use provider::{
    ClientConfig, ForecastDays, LocationQuery, WeatherProvider, provider_from_config,
    weatherapi::WeatherApiClient,
};
