use crate::{
    Config, FetchError,
    model::{CurrentWeather, Forecast},
    provider::weatherapi::WeatherApiClient,
};
use async_trait::async_trait;
use std::fmt::{self, Debug};

pub mod weatherapi;

/// Free-text location sent as the `q` parameter, e.g. "London" or "Paris,FR".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery(String);

impl LocationQuery {
    /// Combine a city with an optional country code.
    pub fn new(city: &str, country: Option<&str>) -> Result<Self, FetchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(FetchError::InvalidQuery("city name must not be empty".into()));
        }

        let query = match country.map(str::trim).filter(|c| !c.is_empty()) {
            Some(country) => format!("{city},{country}"),
            None => city.to_string(),
        };

        Ok(Self(query))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Number of forecast days, always within 1..=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastDays(u8);

impl ForecastDays {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 7;

    pub fn new(days: u8) -> Self {
        Self(days.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for ForecastDays {
    fn default() -> Self {
        Self(3)
    }
}

/// Connection settings injected into a client at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, query: &LocationQuery) -> Result<CurrentWeather, FetchError>;

    async fn fetch_forecast(
        &self,
        query: &LocationQuery,
        days: ForecastDays,
    ) -> Result<Forecast, FetchError>;
}

/// Construct the WeatherAPI.com client from on-disk config and the environment.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let client_config = config.client_config()?;
    Ok(Box::new(WeatherApiClient::new(client_config)))
}
