//! Fixtures shared by unit tests.

use chrono::{Duration, NaiveDate};

use crate::model::{
    CurrentConditions, CurrentWeather, Forecast, ForecastDay, HourSample, Location,
};

pub(crate) fn location() -> Location {
    Location {
        name: "London".into(),
        region: "City of London, Greater London".into(),
        country: "United Kingdom".into(),
        latitude: 51.52,
        longitude: -0.11,
        local_time: "2024-01-15 14:05".into(),
    }
}

pub(crate) fn current_weather() -> CurrentWeather {
    CurrentWeather {
        location: location(),
        current: CurrentConditions {
            temperature_c: 25.0,
            feels_like_c: 24.0,
            humidity_pct: 50,
            pressure_hpa: 1013.0,
            wind_kph: 20.0,
            wind_direction: "SW".into(),
            gust_kph: None,
            cloud_pct: 25,
            visibility_km: 10.0,
            uv_index: 5.0,
            condition: "Sunny".into(),
            icon: "//cdn.weatherapi.com/weather/64x64/day/113.png".into(),
            last_updated: "2024-01-15 14:00".into(),
        },
    }
}

fn hour(date: NaiveDate, h: u32) -> HourSample {
    let offset = f64::from(h);
    HourSample {
        time: date.and_hms_opt(h, 0, 0).unwrap_or_default(),
        temperature_c: 5.0 + offset * 0.5,
        feels_like_c: 3.0 + offset * 0.5,
        humidity_pct: (60 + h) as u8,
        pressure_hpa: 1000.0 + offset,
        wind_kph: 10.0 + offset,
        chance_of_rain_pct: (h * 4) as u8,
        condition: if h < 12 { "Mist".into() } else { "Cloudy".into() },
    }
}

fn day(date: NaiveDate, hours: u32, index: u32) -> ForecastDay {
    let shift = f64::from(index);
    ForecastDay {
        date,
        max_temp_c: 12.349 + shift,
        min_temp_c: 3.35 + shift,
        avg_temp_c: 7.81 + shift,
        avg_humidity_pct: 71.25,
        chance_of_rain_pct: (10 * index) as u8,
        condition: "Patchy rain nearby".into(),
        hours: (0..hours).map(|h| hour(date, h)).collect(),
    }
}

/// A forecast starting on Monday 2024-01-15 with `days` full days of 24 hours.
pub(crate) fn forecast_with_days(days: u32) -> Forecast {
    let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default();
    Forecast {
        location: location(),
        days: (0..days)
            .map(|i| day(start + Duration::days(i64::from(i)), 24, i))
            .collect(),
    }
}

/// A single-day forecast whose day holds only `hours` samples.
pub(crate) fn forecast_with_hours(hours: u32) -> Forecast {
    let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default();
    Forecast { location: location(), days: vec![day(start, hours, 0)] }
}
