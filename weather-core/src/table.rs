//! Flat, display-ready rows for the daily and hourly tables.

use serde::Serialize;

use crate::model::{Forecast, ForecastDay};

/// Number of hours shown in the hourly table.
pub const HOURLY_TABLE_LIMIT: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRow {
    /// ISO date, e.g. "2024-01-15".
    pub date: String,
    /// English weekday name, e.g. "Monday".
    pub weekday: String,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub avg_temp_c: f64,
    pub avg_humidity_pct: f64,
    pub condition: String,
    /// Rain chance with a trailing percent sign, e.g. "40%".
    pub chance_of_rain: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRow {
    /// "HH:MM" in the location's local time.
    pub time: String,
    pub temperature_c: f64,
    pub condition: String,
    pub chance_of_rain_pct: u8,
    pub humidity_pct: u8,
}

/// Round to one decimal place, halves away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One row per forecast day, in forecast order.
pub fn build_daily_table(forecast: &Forecast) -> Vec<DailyRow> {
    forecast
        .days
        .iter()
        .map(|day| DailyRow {
            date: day.date.format("%Y-%m-%d").to_string(),
            weekday: day.date.format("%A").to_string(),
            max_temp_c: round1(day.max_temp_c),
            min_temp_c: round1(day.min_temp_c),
            avg_temp_c: round1(day.avg_temp_c),
            avg_humidity_pct: round1(day.avg_humidity_pct),
            condition: day.condition.clone(),
            chance_of_rain: format!("{}%", day.chance_of_rain_pct),
        })
        .collect()
}

/// Up to `limit` rows from the start of `day`; shorter days give fewer rows.
pub fn build_hourly_table(day: &ForecastDay, limit: usize) -> Vec<HourlyRow> {
    day.hours
        .iter()
        .take(limit)
        .map(|hour| HourlyRow {
            time: hour.time.format("%H:%M").to_string(),
            temperature_c: round1(hour.temperature_c),
            condition: hour.condition.clone(),
            chance_of_rain_pct: hour.chance_of_rain_pct,
            humidity_pct: hour.humidity_pct,
        })
        .collect()
}
