//! Surf-quality rating of a single forecast point.
//!
//! A rating is the rounded mean of three equally weighted sub-scores: the
//! swell/wind geometry relative to the beach, the swell period and the swell
//! height. Every score, and the final rating, lies in 1..=5.

use crate::models::{ForecastPoint, GeoPosition};

/// Swell heights in meters: (min inclusive, max exclusive).
const ANKLE_TO_KNEE: (f64, f64) = (0.3, 1.0);
const WAIST_HIGH: (f64, f64) = (1.0, 2.0);
const HEAD_HIGH_MIN: f64 = 2.0;

/// Rates forecast points for one beach. Only the beach orientation matters.
#[derive(Debug, Clone, Copy)]
pub struct RatingService {
    position: GeoPosition,
}

impl RatingService {
    pub fn new(position: GeoPosition) -> Self {
        Self { position }
    }

    /// Final 1–5 rating for `point`, rounded half-up.
    pub fn rate_point(&self, point: &ForecastPoint) -> u8 {
        let swell_position = position_from_angle(point.swell_direction);
        let wind_position = position_from_angle(point.wind_direction);

        let wind_and_wave =
            self.rating_for_wind_and_wave_positions(swell_position, wind_position);
        let swell_height = rating_for_swell_size(point.swell_height);
        let swell_period = rating_for_swell_period(point.swell_period);

        let mean = f64::from(wind_and_wave + swell_height + swell_period) / 3.0;
        mean.round() as u8
    }

    /// | Swell vs wind                         | Score |
    /// |---------------------------------------|-------|
    /// | same cardinal (onshore)               | 1     |
    /// | offshore for this beach's orientation | 5     |
    /// | anything else (cross-shore)           | 3     |
    pub fn rating_for_wind_and_wave_positions(
        &self,
        wave: GeoPosition,
        wind: GeoPosition,
    ) -> u8 {
        if wave == wind {
            1
        } else if self.is_wind_offshore(wave, wind) {
            5
        } else {
            3
        }
    }

    fn is_wind_offshore(&self, wave: GeoPosition, wind: GeoPosition) -> bool {
        use GeoPosition::*;
        matches!(
            (wave, wind, self.position),
            (North, South, North) | (South, North, South) | (East, West, East) | (West, East, West)
        )
    }
}

/// Scores a swell period in seconds. Never scores 3.
///
/// | Range     | Score |
/// |-----------|-------|
/// | >= 14     | 5     |
/// | [10, 14)  | 4     |
/// | [7, 10)   | 2     |
/// | < 7       | 1     |
pub fn rating_for_swell_period(period: f64) -> u8 {
    match period {
        p if p >= 14.0 => 5,
        p if p >= 10.0 => 4,
        p if p >= 7.0 => 2,
        _ => 1,
    }
}

/// Scores a swell height in meters.
///
/// | Range       | Score |
/// |-------------|-------|
/// | >= 2.0      | 5     |
/// | [1.0, 2.0)  | 3     |
/// | [0.3, 1.0)  | 2     |
/// | < 0.3       | 1     |
pub fn rating_for_swell_size(height: f64) -> u8 {
    match height {
        h if h >= HEAD_HIGH_MIN => 5,
        h if h >= WAIST_HIGH.0 && h < WAIST_HIGH.1 => 3,
        h if h >= ANKLE_TO_KNEE.0 && h < ANKLE_TO_KNEE.1 => 2,
        _ => 1,
    }
}

/// Classifies an angle in degrees into a cardinal position.
///
/// North straddles zero: `[310, 360]` and `[0, 50)`. Angles outside `[0, 360]`
/// are not expected and fall back to East.
pub fn position_from_angle(degrees: f64) -> GeoPosition {
    match degrees {
        d if d >= 310.0 || (0.0..50.0).contains(&d) => GeoPosition::North,
        d if (50.0..120.0).contains(&d) => GeoPosition::East,
        d if (120.0..220.0).contains(&d) => GeoPosition::South,
        d if (220.0..310.0).contains(&d) => GeoPosition::West,
        _ => GeoPosition::East,
    }
}
