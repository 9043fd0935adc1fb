//! Scaling of current readings onto a shared 0–100 radar axis.

use crate::model::CurrentConditions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadarAxis {
    Temperature,
    Humidity,
    Pressure,
    WindSpeed,
    FeelsLike,
    UvIndex,
}

impl RadarAxis {
    /// Axes in display order.
    pub const ALL: [RadarAxis; 6] = [
        RadarAxis::Temperature,
        RadarAxis::Humidity,
        RadarAxis::Pressure,
        RadarAxis::WindSpeed,
        RadarAxis::FeelsLike,
        RadarAxis::UvIndex,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RadarAxis::Temperature => "Temperature",
            RadarAxis::Humidity => "Humidity",
            RadarAxis::Pressure => "Pressure",
            RadarAxis::WindSpeed => "Wind Speed",
            RadarAxis::FeelsLike => "Feels Like",
            RadarAxis::UvIndex => "UV Index",
        }
    }

    /// Reading that maps to 100 on the radar.
    pub fn scale_max(self) -> f64 {
        match self {
            RadarAxis::Temperature | RadarAxis::FeelsLike => 50.0,
            RadarAxis::Humidity | RadarAxis::WindSpeed => 100.0,
            RadarAxis::Pressure => 1100.0,
            RadarAxis::UvIndex => 10.0,
        }
    }

    fn raw(self, current: &CurrentConditions) -> f64 {
        match self {
            RadarAxis::Temperature => current.temperature_c,
            RadarAxis::Humidity => f64::from(current.humidity_pct),
            RadarAxis::Pressure => current.pressure_hpa,
            RadarAxis::WindSpeed => current.wind_kph,
            RadarAxis::FeelsLike => current.feels_like_c,
            RadarAxis::UvIndex => current.uv_index,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarReading {
    pub axis: RadarAxis,
    pub raw: f64,
    pub normalized: f64,
}

/// Normalized values in [`RadarAxis::ALL`] order.
///
/// Values are not clamped: readings above the scale maximum exceed 100.
pub fn normalize(current: &CurrentConditions) -> [f64; 6] {
    radar_readings(current).map(|r| r.normalized)
}

pub fn radar_readings(current: &CurrentConditions) -> [RadarReading; 6] {
    RadarAxis::ALL.map(|axis| {
        let raw = axis.raw(current);
        RadarReading { axis, raw, normalized: raw / axis.scale_max() * 100.0 }
    })
}
