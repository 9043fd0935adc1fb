//! Fetch-and-build pipeline producing everything the renderer needs.

use tracing::{info, instrument};

use crate::{
    FetchError,
    model::{CurrentConditions, CurrentWeather, Forecast, Location},
    provider::{ForecastDays, LocationQuery, WeatherProvider},
    radar::{RadarReading, radar_readings},
    series::{TimeSeries, conditions_series, temperature_series},
    table::{DailyRow, HOURLY_TABLE_LIMIT, HourlyRow, build_daily_table, build_hourly_table},
};

/// Optional dashboard sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections {
    pub hourly: bool,
    pub radar: bool,
}

impl Default for Sections {
    fn default() -> Self {
        Self { hourly: true, radar: true }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardRequest {
    pub query: LocationQuery,
    pub days: ForecastDays,
    pub sections: Sections,
}

/// Display-ready data for one render pass.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub location: Location,
    pub current: CurrentConditions,
    /// Actual and feels-like temperature.
    pub temperature: Vec<TimeSeries>,
    /// Humidity, pressure and wind speed.
    pub conditions: Vec<TimeSeries>,
    pub radar: Option<[RadarReading; 6]>,
    pub daily: Vec<DailyRow>,
    pub hourly: Option<Vec<HourlyRow>>,
}

impl Dashboard {
    /// Derive every display structure from the two fetched documents.
    pub fn build(current: CurrentWeather, forecast: &Forecast, sections: Sections) -> Self {
        let hourly = sections.hourly.then(|| {
            forecast
                .first_day()
                .map(|day| build_hourly_table(day, HOURLY_TABLE_LIMIT))
                .unwrap_or_default()
        });

        Self {
            temperature: temperature_series(forecast),
            conditions: conditions_series(forecast),
            radar: sections.radar.then(|| radar_readings(&current.current)),
            daily: build_daily_table(forecast),
            hourly,
            location: current.location,
            current: current.current,
        }
    }
}

/// Run both fetches and build the dashboard; either failure aborts the cycle.
#[instrument(skip(provider, request), fields(query = %request.query, days = request.days.get()))]
pub async fn fetch_dashboard(
    provider: &dyn WeatherProvider,
    request: &DashboardRequest,
) -> Result<Dashboard, FetchError> {
    let (current, forecast) = tokio::try_join!(
        provider.fetch_current(&request.query),
        provider.fetch_forecast(&request.query, request.days),
    )?;

    info!(
        location = %current.location.name,
        days = forecast.days.len(),
        "fetched weather data"
    );

    Ok(Dashboard::build(current, &forecast, request.sections))
}
