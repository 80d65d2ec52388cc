//! Trait for fetching raw forecast points for a location.

use anyhow::Result;

use crate::models::ForecastPoint;

/// Abstraction over a marine-weather provider (e.g., StormGlass).
///
/// Implementations drop incomplete points before returning, so every point
/// has all direction, height and period fields set.
#[async_trait::async_trait]
pub trait ForecastSource: Send + Sync {
    /// Returns the forecast points for the given coordinates, in time order.
    async fn fetch_points(&self, lat: f64, lng: f64) -> Result<Vec<ForecastPoint>>;
}
