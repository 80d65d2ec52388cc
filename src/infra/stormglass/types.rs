use serde::Deserialize;
use std::collections::HashMap;

use crate::models::ForecastPoint;

/// Values of one parameter keyed by data source (`noaa`, `sg`, `icon`, ...).
/// A source may report `null`.
pub type PointSource = HashMap<String, Option<f64>>;

/// One hour as returned by StormGlass. Any field may be missing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StormGlassPoint {
    pub time: Option<String>,
    pub swell_direction: Option<PointSource>,
    pub swell_height: Option<PointSource>,
    pub swell_period: Option<PointSource>,
    pub wave_direction: Option<PointSource>,
    pub wave_height: Option<PointSource>,
    pub wind_direction: Option<PointSource>,
    pub wind_speed: Option<PointSource>,
}

#[derive(Debug, Deserialize)]
pub struct StormGlassForecastResponse {
    #[serde(default)]
    pub hours: Vec<StormGlassPoint>,
}

/// Converts a raw response into [`ForecastPoint`]s, reading every value from
/// `source`. Hours missing the time, a parameter, or the source's value for a
/// parameter (absent or `null`) are skipped.
pub fn normalize_response(response: StormGlassForecastResponse, source: &str) -> Vec<ForecastPoint> {
    response
        .hours
        .into_iter()
        .filter_map(|point| normalize_point(point, source))
        .collect()
}

fn normalize_point(point: StormGlassPoint, source: &str) -> Option<ForecastPoint> {
    let value = |field: &Option<PointSource>| -> Option<f64> {
        field.as_ref()?.get(source).copied().flatten()
    };

    Some(ForecastPoint {
        swell_direction: value(&point.swell_direction)?,
        swell_height: value(&point.swell_height)?,
        swell_period: value(&point.swell_period)?,
        wave_direction: value(&point.wave_direction)?,
        wave_height: value(&point.wave_height)?,
        wind_direction: value(&point.wind_direction)?,
        wind_speed: value(&point.wind_speed)?,
        time: point.time?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW_3_HOURS: &str = include_str!("../../../tests/fixtures/stormglass_weather_3_hours.json");
    const NORMALIZED_3_HOURS: &str =
        include_str!("../../../tests/fixtures/stormglass_normalized_response_3_hours.json");

    #[test]
    fn test_normalize_fixture() {
        let raw: StormGlassForecastResponse = serde_json::from_str(RAW_3_HOURS).unwrap();
        let expected: Vec<ForecastPoint> = serde_json::from_str(NORMALIZED_3_HOURS).unwrap();

        assert_eq!(normalize_response(raw, "noaa"), expected);
    }

    #[test]
    fn test_normalize_picks_requested_source() {
        let raw: StormGlassForecastResponse = serde_json::from_str(RAW_3_HOURS).unwrap();

        let points = normalize_response(raw, "sg");

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].swell_direction, 64.26);
        assert_eq!(points[0].wind_speed, 3.48);
    }

    #[test]
    fn test_incomplete_points_are_dropped() {
        let raw: StormGlassForecastResponse = serde_json::from_str(
            r#"{"hours":[{"windDirection":{"noaa":300},"time":"2020-04-26T00:00:00+00:00"}]}"#,
        )
        .unwrap();

        assert!(normalize_response(raw, "noaa").is_empty());
    }

    #[test]
    fn test_point_without_source_value_is_dropped() {
        let raw: StormGlassForecastResponse = serde_json::from_str(RAW_3_HOURS).unwrap();

        assert!(normalize_response(raw, "unknown").is_empty());
    }

    #[test]
    fn test_zero_values_are_kept() {
        let raw: StormGlassForecastResponse = serde_json::from_str(
            r#"{"hours":[{
                "time":"2020-04-26T00:00:00+00:00",
                "swellDirection":{"noaa":0},
                "swellHeight":{"noaa":0.5},
                "swellPeriod":{"noaa":8},
                "waveDirection":{"noaa":0},
                "waveHeight":{"noaa":0.6},
                "windDirection":{"noaa":0},
                "windSpeed":{"noaa":0}
            }]}"#,
        )
        .unwrap();

        let points = normalize_response(raw, "noaa");

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].wind_direction, 0.0);
    }

    #[test]
    fn test_null_values_drop_only_their_hour() {
        let raw: StormGlassForecastResponse = serde_json::from_str(
            r#"{"hours":[
                {
                    "time":"2020-04-26T00:00:00+00:00",
                    "swellDirection":{"noaa":10,"icon":null},
                    "swellHeight":{"noaa":0.5},
                    "swellPeriod":{"noaa":8},
                    "waveDirection":{"noaa":20},
                    "waveHeight":{"noaa":0.6},
                    "windDirection":{"noaa":200},
                    "windSpeed":{"noaa":5}
                },
                {
                    "time":"2020-04-26T01:00:00+00:00",
                    "swellDirection":{"noaa":10},
                    "swellHeight":{"noaa":null,"sg":0.5},
                    "swellPeriod":{"noaa":8},
                    "waveDirection":{"noaa":20},
                    "waveHeight":{"noaa":0.6},
                    "windDirection":{"noaa":200},
                    "windSpeed":{"noaa":5}
                },
                {
                    "time":"2020-04-26T02:00:00+00:00",
                    "swellDirection":{"noaa":12},
                    "swellHeight":{"noaa":0.7},
                    "swellPeriod":{"noaa":9},
                    "waveDirection":{"noaa":22},
                    "waveHeight":{"noaa":0.8},
                    "windDirection":{"noaa":210},
                    "windSpeed":{"noaa":6}
                }
            ]}"#,
        )
        .unwrap();

        let points = normalize_response(raw, "noaa");

        let times: Vec<_> = points.iter().map(|p| p.time.as_str()).collect();
        assert_eq!(times, ["2020-04-26T00:00:00+00:00", "2020-04-26T02:00:00+00:00"]);
        assert_eq!(points[0].swell_direction, 10.0);
    }

    #[test]
    fn test_missing_hours_is_empty() {
        let raw: StormGlassForecastResponse = serde_json::from_str("{}").unwrap();
        assert!(normalize_response(raw, "noaa").is_empty());
    }
}
