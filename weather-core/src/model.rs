use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Where the readings were taken, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Provider-formatted local time, e.g. "2024-01-15 14:05".
    pub local_time: String,
}

/// Snapshot of the weather at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: f64,
    pub wind_kph: f64,
    pub wind_direction: String,
    /// Not every observation station reports gusts.
    pub gust_kph: Option<f64>,
    pub cloud_pct: u8,
    pub visibility_km: f64,
    pub uv_index: f64,
    pub condition: String,
    /// Icon reference as sent by the provider, often protocol-relative.
    pub icon: String,
    pub last_updated: String,
}

impl CurrentConditions {
    /// Absolute URL for the condition icon.
    pub fn icon_url(&self) -> String {
        if self.icon.starts_with("//") {
            format!("https:{}", self.icon)
        } else {
            self.icon.clone()
        }
    }
}

/// Result of the current-conditions fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location: Location,
    pub current: CurrentConditions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourSample {
    pub time: NaiveDateTime,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: f64,
    pub wind_kph: f64,
    pub chance_of_rain_pct: u8,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub avg_temp_c: f64,
    pub avg_humidity_pct: f64,
    pub chance_of_rain_pct: u8,
    pub condition: String,
    pub hours: Vec<HourSample>,
}

/// Forecast days in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub location: Location,
    pub days: Vec<ForecastDay>,
}

impl Forecast {
    pub fn first_day(&self) -> Option<&ForecastDay> {
        self.days.first()
    }
}
