//! Plain-text rendering of a [`Dashboard`].

use unicode_width::UnicodeWidthStr;
use weather_core::{
    Dashboard, FetchError,
    radar::RadarReading,
    series::TimeSeries,
    table::{DailyRow, HourlyRow},
};

const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const RADAR_BAR_WIDTH: usize = 20;
/// Content width of one chart column; every column is followed by a space.
const CELL_WIDTH: usize = 7;

/// The whole dashboard, top to bottom.
pub fn render_dashboard(d: &Dashboard) -> String {
    let mut out = String::new();

    out.push_str(&format!("📍 {}, {}\n", d.location.name, d.location.country));
    out.push_str(&format!("Local Time: {}\n\n", d.location.local_time));

    out.push_str(&render_current(d));
    out.push('\n');

    out.push_str(&render_chart("24-Hour Temperature Forecast", &d.temperature, true));
    out.push('\n');
    out.push_str(&render_chart("Weather Metrics - Next 24 Hours", &d.conditions, false));

    if let Some(readings) = &d.radar {
        out.push('\n');
        out.push_str(&render_radar(readings));
    }

    out.push_str("\n📅 Daily Forecast\n");
    out.push_str(&render_daily(&d.daily));

    if let Some(hourly) = &d.hourly {
        out.push_str("\n⏰ Hourly Forecast (Today)\n");
        out.push_str(&render_hourly(hourly));
    }

    out.push('\n');
    out.push_str(&render_additional(d));
    out
}

/// Single message shown instead of the dashboard when a fetch fails.
pub fn render_error(err: &FetchError) -> String {
    format!("Unable to fetch weather data: {err}\n")
}

fn render_current(d: &Dashboard) -> String {
    let c = &d.current;
    let mut out = String::from("Current Weather\n");

    out.push_str(&render_table(
        &["Temperature", "Humidity", "Pressure", "Wind Speed"],
        &[vec![
            format!("{}°C", c.temperature_c),
            format!("{}%", c.humidity_pct),
            format!("{} hPa", c.pressure_hpa),
            format!("{} km/h", c.wind_kph),
        ]],
    ));

    out.push_str(&format!("  Condition: {}\n", c.condition));
    out.push_str(&format!("  Icon: {}\n", c.icon_url()));
    out.push_str(&format!(
        "  Feels like: {}°C   UV Index: {}\n",
        c.feels_like_c, c.uv_index
    ));
    out
}

/// Sparkline chart with one row per series over a shared time axis.
///
/// With `shared_axis` every series is scaled to the combined range; otherwise
/// each series gets its own scale.
fn render_chart(title: &str, series: &[TimeSeries], shared_axis: bool) -> String {
    let mut out = format!("{title}\n");

    let Some(first) = series.first().filter(|s| !s.is_empty()) else {
        out.push_str("  (no hourly data)\n");
        return out;
    };

    let labels: Vec<String> = series
        .iter()
        .map(|s| format!("{} ({})", s.metric.label(), s.metric.unit()))
        .collect();
    let label_width = labels.iter().map(|l| l.width()).max().unwrap_or(0).max("Time".len());

    let combined = series.iter().filter_map(TimeSeries::range).reduce(|a, b| {
        (a.0.min(b.0), a.1.max(b.1))
    });

    out.push_str(&format!("  {} ", pad("Time", label_width)));
    for t in &first.timestamps {
        out.push_str(&cell(&t.format("%H:%M").to_string()));
    }
    out.push('\n');

    for (s, label) in series.iter().zip(&labels) {
        let range = if shared_axis { combined } else { s.range() };
        let Some((lo, hi)) = range else { continue };

        out.push_str(&format!("  {} ", pad(label, label_width)));
        for v in &s.values {
            out.push_str(&cell(&format!("  {}", spark(*v, lo, hi))));
        }
        out.push('\n');

        out.push_str(&format!("  {} ", pad("", label_width)));
        for v in &s.values {
            out.push_str(&cell(&format!("{v:.1}")));
        }
        out.push('\n');
    }

    out
}

fn spark(value: f64, lo: f64, hi: f64) -> char {
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        return SPARKS[SPARKS.len() / 2];
    }
    let level = ((value - lo) / span * (SPARKS.len() - 1) as f64).round();
    SPARKS[(level.max(0.0) as usize).min(SPARKS.len() - 1)]
}

fn render_radar(readings: &[RadarReading]) -> String {
    let mut out = String::from("Current Weather Radar (0-100)\n");
    let label_width = readings.iter().map(|r| r.axis.label().width()).max().unwrap_or(0);

    for r in readings {
        let filled = (r.normalized.max(0.0) / 100.0 * RADAR_BAR_WIDTH as f64).round() as usize;
        let mut bar = "█".repeat(filled.min(RADAR_BAR_WIDTH));
        // Readings above the scale maximum overflow the bar.
        if r.normalized > 100.0 {
            bar.push('▶');
        }
        out.push_str(&format!(
            "  {} {} {:>6.1}  ({})\n",
            pad(r.axis.label(), label_width),
            pad(&bar, RADAR_BAR_WIDTH + 1),
            r.normalized,
            r.raw
        ));
    }
    out
}

fn render_daily(rows: &[DailyRow]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.date.clone(),
                r.weekday.clone(),
                format!("{:.1}", r.max_temp_c),
                format!("{:.1}", r.min_temp_c),
                format!("{:.1}", r.avg_temp_c),
                format!("{:.1}", r.avg_humidity_pct),
                r.condition.clone(),
                r.chance_of_rain.clone(),
            ]
        })
        .collect();

    render_table(
        &[
            "Date",
            "Day",
            "Max Temp (°C)",
            "Min Temp (°C)",
            "Avg Temp (°C)",
            "Avg Humidity (%)",
            "Condition",
            "Chance of Rain",
        ],
        &cells,
    )
}

fn render_hourly(rows: &[HourlyRow]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.time.clone(),
                format!("{:.1}", r.temperature_c),
                r.condition.clone(),
                r.chance_of_rain_pct.to_string(),
                r.humidity_pct.to_string(),
            ]
        })
        .collect();

    render_table(&["Time", "Temp (°C)", "Condition", "Rain (%)", "Humidity"], &cells)
}

fn render_additional(d: &Dashboard) -> String {
    let l = &d.location;
    let c = &d.current;
    let gust = c.gust_kph.map_or_else(|| "N/A".to_string(), |g| format!("{g} km/h"));

    let mut out = String::from("Additional Information\n");
    out.push_str(&format!("  Location: {}, {}, {}\n", l.name, l.region, l.country));
    out.push_str(&format!("  Latitude: {}   Longitude: {}\n", l.latitude, l.longitude));
    out.push_str(&format!("  Wind Direction: {}\n", c.wind_direction));
    out.push_str(&format!("  Wind Gust: {gust}\n"));
    out.push_str(&format!("  Cloud Cover: {}%\n", c.cloud_pct));
    out.push_str(&format!("  Visibility: {} km\n", c.visibility_km));
    out.push_str(&format!("  Last Updated: {}\n", c.last_updated));
    out.push_str("  Data Source: WeatherAPI.com\n");
    out
}

/// Left-aligned columns sized to their widest cell.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.width());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells.iter().zip(&widths).map(|(c, w)| pad(c, *w)).collect();
        format!("  {}\n", padded.join("  ").trim_end())
    };

    let mut out = line(headers.to_vec());
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    out.push_str(&line(rule.iter().map(String::as_str).collect()));
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out
}

fn cell(text: &str) -> String {
    format!("{} ", pad(text, CELL_WIDTH))
}

fn pad(s: &str, width: usize) -> String {
    format!("{s}{}", " ".repeat(width.saturating_sub(s.width())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use weather_core::{
        CurrentConditions, CurrentWeather, Forecast, ForecastDay, HourSample, Location, Sections,
        series::Metric,
    };

    fn dashboard(gust: Option<f64>, sections: Sections) -> Dashboard {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let location = Location {
            name: "Oslo".into(),
            region: "Oslo".into(),
            country: "Norway".into(),
            latitude: 59.91,
            longitude: 10.75,
            local_time: "2024-01-15 09:30".into(),
        };
        let hours = (0..24)
            .map(|h| HourSample {
                time: date.and_hms_opt(h, 0, 0).unwrap(),
                temperature_c: -5.0 + f64::from(h) * 0.2,
                feels_like_c: -9.0 + f64::from(h) * 0.2,
                humidity_pct: 85,
                pressure_hpa: 1020.0,
                wind_kph: 8.0,
                chance_of_rain_pct: 0,
                condition: "Light snow".into(),
            })
            .collect();
        let forecast = Forecast {
            location: location.clone(),
            days: vec![ForecastDay {
                date,
                max_temp_c: -0.44,
                min_temp_c: -7.05,
                avg_temp_c: -3.3,
                avg_humidity_pct: 86.0,
                chance_of_rain_pct: 0,
                condition: "Light snow".into(),
                hours,
            }],
        };
        let current = CurrentWeather {
            location,
            current: CurrentConditions {
                temperature_c: -4.0,
                feels_like_c: -8.5,
                humidity_pct: 86,
                pressure_hpa: 1021.0,
                wind_kph: 130.0,
                wind_direction: "N".into(),
                gust_kph: gust,
                cloud_pct: 100,
                visibility_km: 4.0,
                uv_index: 0.0,
                condition: "Light snow".into(),
                icon: "//cdn.weatherapi.com/weather/64x64/day/326.png".into(),
                last_updated: "2024-01-15 09:15".into(),
            },
        };
        Dashboard::build(current, &forecast, sections)
    }

    #[test]
    fn missing_gust_renders_placeholder() {
        let out = render_dashboard(&dashboard(None, Sections::default()));
        assert!(out.contains("Wind Gust: N/A\n"));
    }

    #[test]
    fn present_gust_renders_value() {
        let out = render_dashboard(&dashboard(Some(31.7), Sections::default()));
        assert!(out.contains("Wind Gust: 31.7 km/h\n"));
    }

    #[test]
    fn charts_show_eight_time_labels() {
        let d = dashboard(None, Sections::default());
        let chart = render_chart("t", &d.temperature, true);
        let time_row = chart.lines().nth(1).unwrap();

        assert_eq!(time_row.matches(':').count(), 8);
        assert!(time_row.contains("00:00") && time_row.contains("21:00"));
    }

    #[test]
    fn four_digit_values_stay_separated() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let pressure = TimeSeries {
            metric: Metric::Pressure,
            timestamps: (0..8).map(|i| date.and_hms_opt(i * 3, 0, 0).unwrap()).collect(),
            values: (0..8).map(|i| 1012.0 + f64::from(i)).collect(),
        };

        let chart = render_chart("Pressure", &[pressure], false);
        let values_row = chart.lines().nth(3).unwrap();
        let values: Vec<&str> = values_row.split_whitespace().collect();

        assert_eq!(
            values,
            ["1012.0", "1013.0", "1014.0", "1015.0", "1016.0", "1017.0", "1018.0", "1019.0"]
        );
    }

    #[test]
    fn empty_series_renders_placeholder() {
        let chart = render_chart("Temps", &[], true);
        assert_eq!(chart, "Temps\n  (no hourly data)\n");
    }

    #[test]
    fn radar_marks_overflow() {
        let d = dashboard(None, Sections::default());
        let radar = render_radar(d.radar.as_ref().unwrap());

        let wind = radar.lines().find(|l| l.contains("Wind Speed")).unwrap();
        assert!(wind.contains('▶'));
        assert!(wind.contains("130.0"));
    }

    #[test]
    fn toggled_off_sections_are_not_rendered() {
        let out = render_dashboard(&dashboard(None, Sections { hourly: false, radar: false }));
        assert!(!out.contains("Hourly Forecast"));
        assert!(!out.contains("Radar"));
        assert!(out.contains("Daily Forecast"));
    }

    #[test]
    fn daily_table_shows_rounded_values() {
        let out = render_dashboard(&dashboard(None, Sections::default()));
        assert!(out.contains("Monday"));
        assert!(out.contains("-0.4"));
        assert!(out.contains("-7.1"));
        assert!(out.contains("0%"));
    }

    #[test]
    fn table_columns_line_up() {
        let table = render_table(
            &["A", "Long header"],
            &[vec!["wide cell".into(), "x".into()], vec!["°C".into(), "y".into()]],
        );
        let lines: Vec<&str> = table.lines().collect();

        let col = lines[0].find("Long").unwrap();
        assert_eq!(lines[2].find('x').unwrap(), col);
        assert_eq!(lines[3].chars().position(|c| c == 'y').unwrap(), col);
    }

    #[test]
    fn error_is_one_line() {
        let err = FetchError::Upstream { status: 400, message: "No matching location found.".into() };
        let out = render_error(&err);
        assert_eq!(out.lines().count(), 1);
        assert!(out.starts_with("Unable to fetch weather data"));
    }
}
