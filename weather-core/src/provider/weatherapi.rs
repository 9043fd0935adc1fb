use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

use crate::{
    FetchError,
    model::{CurrentConditions, CurrentWeather, Forecast, ForecastDay, HourSample, Location},
    provider::{ClientConfig, ForecastDays, LocationQuery},
};

use super::WeatherProvider;

/// WeatherAPI.com client for the `current.json` and `forecast.json` endpoints.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    config: ClientConfig,
    http: Client,
}

impl WeatherApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config, http: Client::new() }
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{name}", self.config.base_url.trim_end_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        name: &str,
        params: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = self.endpoint(name);
        debug!(%url, "requesting WeatherAPI.com");

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;

        if !status.is_success() {
            let message = api_error_message(&body).unwrap_or_else(|| truncate_body(&body));
            warn!(status = status.as_u16(), %message, "WeatherAPI request failed");
            return Err(FetchError::Upstream { status: status.as_u16(), message });
        }

        // The API occasionally wraps errors in a 200 response.
        if let Some(message) = api_error_message(&body) {
            return Err(FetchError::Upstream { status: status.as_u16(), message });
        }

        serde_json::from_str(&body)
            .map_err(|e| FetchError::Malformed(format!("{name}: {e}")))
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    #[instrument(skip(self), fields(query = %query))]
    async fn fetch_current(&self, query: &LocationQuery) -> Result<CurrentWeather, FetchError> {
        let parsed: WaCurrentResponse = self
            .get_json("current.json", &[("q", query.as_str()), ("aqi", "no")])
            .await?;

        Ok(CurrentWeather {
            location: parsed.location.into(),
            current: parsed.current.into(),
        })
    }

    #[instrument(skip(self), fields(query = %query, days = days.get()))]
    async fn fetch_forecast(
        &self,
        query: &LocationQuery,
        days: ForecastDays,
    ) -> Result<Forecast, FetchError> {
        let days_param = days.get().to_string();
        let parsed: WaForecastResponse = self
            .get_json(
                "forecast.json",
                &[
                    ("q", query.as_str()),
                    ("days", days_param.as_str()),
                    ("aqi", "no"),
                    ("alerts", "no"),
                ],
            )
            .await?;

        let received = parsed.forecast.forecastday.len();
        if received != usize::from(days.get()) {
            return Err(FetchError::DayCountMismatch { requested: days.get(), received });
        }

        Ok(Forecast {
            location: parsed.location.into(),
            days: parsed.forecast.forecastday.into_iter().map(Into::into).collect(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    #[serde(default)]
    region: String,
    country: String,
    lat: f64,
    lon: f64,
    localtime: String,
}

impl From<WaLocation> for Location {
    fn from(l: WaLocation) -> Self {
        Location {
            name: l.name,
            region: l.region,
            country: l.country,
            latitude: l.lat,
            longitude: l.lon,
            local_time: l.localtime,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    last_updated: String,
    temp_c: f64,
    feelslike_c: f64,
    humidity: u8,
    pressure_mb: f64,
    wind_kph: f64,
    wind_dir: String,
    gust_kph: Option<f64>,
    cloud: u8,
    vis_km: f64,
    uv: f64,
    condition: WaCondition,
}

impl From<WaCurrent> for CurrentConditions {
    fn from(c: WaCurrent) -> Self {
        CurrentConditions {
            temperature_c: c.temp_c,
            feels_like_c: c.feelslike_c,
            humidity_pct: c.humidity,
            pressure_hpa: c.pressure_mb,
            wind_kph: c.wind_kph,
            wind_direction: c.wind_dir,
            gust_kph: c.gust_kph,
            cloud_pct: c.cloud,
            visibility_km: c.vis_km,
            uv_index: c.uv,
            condition: c.condition.text,
            icon: c.condition.icon,
            last_updated: c.last_updated,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WaCurrentResponse {
    location: WaLocation,
    current: WaCurrent,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    avgtemp_c: f64,
    avghumidity: f64,
    daily_chance_of_rain: u8,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastHour {
    #[serde(deserialize_with = "local_minutes")]
    time: NaiveDateTime,
    temp_c: f64,
    feelslike_c: f64,
    humidity: u8,
    pressure_mb: f64,
    wind_kph: f64,
    chance_of_rain: u8,
    condition: WaCondition,
}

impl From<WaForecastHour> for HourSample {
    fn from(h: WaForecastHour) -> Self {
        HourSample {
            time: h.time,
            temperature_c: h.temp_c,
            feels_like_c: h.feelslike_c,
            humidity_pct: h.humidity,
            pressure_hpa: h.pressure_mb,
            wind_kph: h.wind_kph,
            chance_of_rain_pct: h.chance_of_rain,
            condition: h.condition.text,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
    hour: Vec<WaForecastHour>,
}

impl From<WaForecastDay> for ForecastDay {
    fn from(d: WaForecastDay) -> Self {
        ForecastDay {
            date: d.date,
            max_temp_c: d.day.maxtemp_c,
            min_temp_c: d.day.mintemp_c,
            avg_temp_c: d.day.avgtemp_c,
            avg_humidity_pct: d.day.avghumidity,
            chance_of_rain_pct: d.day.daily_chance_of_rain,
            condition: d.day.condition.text,
            hours: d.hour.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    forecast: WaForecast,
}

#[derive(Debug, Deserialize)]
struct WaErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct WaErrorEnvelope {
    error: WaErrorBody,
}

/// Hour timestamps come as local "YYYY-MM-DD HH:MM" without a zone.
fn local_minutes<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M").map_err(serde::de::Error::custom)
}

fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<WaErrorEnvelope>(body).ok().map(|e| e.error.message)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
