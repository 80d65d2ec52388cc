//! Output formatting and persistence for rated forecasts.
//!
//! Supports pretty JSON on any writer and CSV append.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::models::{BeachForecast, GeoPosition, TimeForecast};

/// One CSV row: a rated point plus the time it was exported.
#[derive(Debug, Serialize)]
pub struct ForecastRecord<'a> {
    pub exported_at: DateTime<Utc>,
    pub time: &'a str,
    pub name: &'a str,
    pub lat: f64,
    pub lng: f64,
    pub position: GeoPosition,
    pub rating: u8,
    pub swell_direction: f64,
    pub swell_height: f64,
    pub swell_period: f64,
    pub wave_direction: f64,
    pub wave_height: f64,
    pub wind_direction: f64,
    pub wind_speed: f64,
}

impl<'a> ForecastRecord<'a> {
    pub fn new(exported_at: DateTime<Utc>, f: &'a BeachForecast) -> Self {
        Self {
            exported_at,
            time: &f.time,
            name: &f.name,
            lat: f.lat,
            lng: f.lng,
            position: f.position,
            rating: f.rating,
            swell_direction: f.swell_direction,
            swell_height: f.swell_height,
            swell_period: f.swell_period,
            wave_direction: f.wave_direction,
            wave_height: f.wave_height,
            wind_direction: f.wind_direction,
            wind_speed: f.wind_speed,
        }
    }
}

/// Writes the grouped forecast as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(mut writer: W, forecast: &[TimeForecast]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, forecast)?;
    writeln!(writer)?;
    Ok(())
}

/// Appends every rated point of `forecast` as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist. Returns the
/// number of rows written.
pub fn append_records(path: &str, forecast: &[TimeForecast]) -> Result<usize> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    let now = Utc::now();
    let mut rows = 0;
    for point in forecast.iter().flat_map(|t| &t.forecast) {
        writer.serialize(ForecastRecord::new(now, point))?;
        rows += 1;
    }
    writer.flush()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn rated(name: &str, time: &str, rating: u8) -> BeachForecast {
        BeachForecast {
            name: name.into(),
            lat: -33.792726,
            lng: 151.289824,
            position: GeoPosition::East,
            rating,
            time: time.into(),
            swell_direction: 64.26,
            swell_height: 0.15,
            swell_period: 3.89,
            wave_direction: 231.38,
            wave_height: 0.47,
            wind_direction: 299.45,
            wind_speed: 100.0,
        }
    }

    fn sample() -> Vec<TimeForecast> {
        vec![
            TimeForecast {
                time: "t1".into(),
                forecast: vec![rated("Manly", "t1", 4), rated("Dee Why", "t1", 2)],
            },
            TimeForecast {
                time: "t2".into(),
                forecast: vec![rated("Manly", "t2", 3)],
            },
        ]
    }

    #[test]
    fn test_write_json_shape() {
        let mut buf = Vec::new();
        write_json(&mut buf, &sample()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["time"], "t1");
        assert_eq!(value[0]["forecast"][0]["name"], "Manly");
        assert_eq!(value[0]["forecast"][0]["swellHeight"], 0.15);
        assert_eq!(value[1]["forecast"][0]["rating"], 3);
    }

    #[test]
    fn test_write_json_empty() {
        let mut buf = Vec::new();
        write_json(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[]\n");
    }

    #[test]
    fn test_append_records_writes_header_once() {
        let path = temp_path("surf_forecast_test_header.csv");
        let _ = fs::remove_file(&path);

        assert_eq!(append_records(&path, &sample()).unwrap(), 3);
        assert_eq!(append_records(&path, &sample()).unwrap(), 3);

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content.lines().filter(|l| l.starts_with("exported_at")).count();
        assert_eq!(header_count, 1);
        // 1 header + 6 data rows
        assert_eq!(content.lines().count(), 7);
        assert!(content.lines().nth(1).unwrap().contains(",t1,Manly,"));
        assert!(content.lines().nth(1).unwrap().contains(",E,4,"));

        fs::remove_file(&path).unwrap();
    }
}
