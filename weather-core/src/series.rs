//! Flattening of the hourly forecast into chartable series.

use chrono::NaiveDateTime;

use crate::model::{Forecast, HourSample};

/// Sampling interval used by the dashboard charts.
pub const DEFAULT_STRIDE_HOURS: usize = 3;
/// Charts cover the first day's first 24 hours.
pub const DEFAULT_WINDOW_HOURS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Temperature,
    FeelsLike,
    Humidity,
    Pressure,
    WindSpeed,
    ChanceOfRain,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::FeelsLike => "Feels Like",
            Metric::Humidity => "Humidity",
            Metric::Pressure => "Pressure",
            Metric::WindSpeed => "Wind Speed",
            Metric::ChanceOfRain => "Chance of Rain",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Temperature | Metric::FeelsLike => "°C",
            Metric::Humidity | Metric::ChanceOfRain => "%",
            Metric::Pressure => "hPa",
            Metric::WindSpeed => "km/h",
        }
    }

    fn value(self, hour: &HourSample) -> f64 {
        match self {
            Metric::Temperature => hour.temperature_c,
            Metric::FeelsLike => hour.feels_like_c,
            Metric::Humidity => f64::from(hour.humidity_pct),
            Metric::Pressure => hour.pressure_hpa,
            Metric::WindSpeed => hour.wind_kph,
            Metric::ChanceOfRain => f64::from(hour.chance_of_rain_pct),
        }
    }
}

/// One metric over time; `timestamps[i]` pairs with `values[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub metric: Metric,
    pub timestamps: Vec<NaiveDateTime>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest and largest value, or `None` for an empty series.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.values.iter().copied().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// Hours of the first forecast day that fall in the window, every `stride_hours`-th one.
fn sampled_hours(
    forecast: &Forecast,
    stride_hours: usize,
    window_hours: usize,
) -> Vec<&HourSample> {
    let Some(day) = forecast.first_day() else {
        return Vec::new();
    };

    day.hours
        .iter()
        .take(window_hours)
        .step_by(stride_hours.max(1))
        .collect()
}

/// Extract one series per metric, all sharing the same sampled timestamps.
///
/// Only the first day is considered. A day with fewer hours than the window
/// yields shorter series rather than an error.
pub fn extract_series(
    forecast: &Forecast,
    stride_hours: usize,
    window_hours: usize,
    metrics: &[Metric],
) -> Vec<TimeSeries> {
    let hours = sampled_hours(forecast, stride_hours, window_hours);
    let timestamps: Vec<NaiveDateTime> = hours.iter().map(|h| h.time).collect();

    metrics
        .iter()
        .map(|&metric| TimeSeries {
            metric,
            timestamps: timestamps.clone(),
            values: hours.iter().map(|h| metric.value(h)).collect(),
        })
        .collect()
}

/// Actual and feels-like temperature for the temperature chart.
pub fn temperature_series(forecast: &Forecast) -> Vec<TimeSeries> {
    extract_series(
        forecast,
        DEFAULT_STRIDE_HOURS,
        DEFAULT_WINDOW_HOURS,
        &[Metric::Temperature, Metric::FeelsLike],
    )
}

/// Humidity, pressure and wind speed for the multi-axis chart.
pub fn conditions_series(forecast: &Forecast) -> Vec<TimeSeries> {
    extract_series(
        forecast,
        DEFAULT_STRIDE_HOURS,
        DEFAULT_WINDOW_HOURS,
        &[Metric::Humidity, Metric::Pressure, Metric::WindSpeed],
    )
}
