use serde::{Deserialize, Serialize};

use super::beach::{Beach, GeoPosition};

/// One normalized forecast instant for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub time: String,
    pub swell_direction: f64,
    pub swell_height: f64,
    pub swell_period: f64,
    pub wave_direction: f64,
    pub wave_height: f64,
    pub wind_direction: f64,
    pub wind_speed: f64,
}

/// A [`ForecastPoint`] joined with the beach it was fetched for and its rating.
///
/// The owning user is not carried. `time` is always the sample's timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeachForecast {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub position: GeoPosition,
    pub rating: u8,
    pub time: String,
    pub swell_direction: f64,
    pub swell_height: f64,
    pub swell_period: f64,
    pub wave_direction: f64,
    pub wave_height: f64,
    pub wind_direction: f64,
    pub wind_speed: f64,
}

impl BeachForecast {
    pub fn new(beach: &Beach, rating: u8, point: ForecastPoint) -> Self {
        Self {
            name: beach.name.clone(),
            lat: beach.lat,
            lng: beach.lng,
            position: beach.position,
            rating,
            time: point.time,
            swell_direction: point.swell_direction,
            swell_height: point.swell_height,
            swell_period: point.swell_period,
            wave_direction: point.wave_direction,
            wave_height: point.wave_height,
            wind_direction: point.wind_direction,
            wind_speed: point.wind_speed,
        }
    }
}

/// Every [`BeachForecast`] sharing one timestamp, best rating first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeForecast {
    pub time: String,
    pub forecast: Vec<BeachForecast>,
}
