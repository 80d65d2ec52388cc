//! Forecast aggregation across beaches.
//!
//! For every beach the raw points are fetched from a [`ForecastSource`], each
//! point is rated against that beach, and the enriched points of all beaches are
//! regrouped by timestamp with the best-rated point of each hour first.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::models::{Beach, BeachForecast, ForecastPoint, TimeForecast};
use crate::services::forecast_source::ForecastSource;
use crate::services::rating::RatingService;

/// The single error surfaced by [`Forecast::process_forecast_for_beaches`].
///
/// The underlying failure stays reachable through
/// [`std::error::Error::source`].
#[derive(Debug, Error)]
#[error("forecast processing failed: {message}")]
pub struct ForecastProcessingError {
    message: String,
    #[source]
    source: anyhow::Error,
}

impl From<anyhow::Error> for ForecastProcessingError {
    fn from(source: anyhow::Error) -> Self {
        Self {
            message: source.to_string(),
            source,
        }
    }
}

/// Joins forecasts, beach data and ratings for a set of beaches.
pub struct Forecast<S> {
    source: S,
}

impl<S: ForecastSource> Forecast<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    #[cfg(test)]
    fn source(&self) -> &S {
        &self.source
    }

    /// Builds the rated forecast for `beaches`, grouped by time.
    ///
    /// Beaches are fetched one after another in input order. Groups appear in
    /// the order their timestamp was first seen; inside a group points are
    /// sorted by rating descending, ties keeping fetch order.
    ///
    /// # Errors
    ///
    /// Fails as a whole if the source fails for any beach. No partial result is
    /// returned.
    #[tracing::instrument(skip_all, fields(beaches = beaches.len()))]
    pub async fn process_forecast_for_beaches(
        &self,
        beaches: &[Beach],
    ) -> Result<Vec<TimeForecast>, ForecastProcessingError> {
        let rated = self.calculate_rating(beaches).await.map_err(|e| {
            error!(error = %format!("{e:#}"), "Forecast processing failed");
            ForecastProcessingError::from(e)
        })?;

        let mut by_time = map_forecast_by_time(rated);
        for group in &mut by_time {
            group.forecast.sort_by(|a, b| b.rating.cmp(&a.rating));
        }

        Ok(by_time)
    }

    async fn calculate_rating(&self, beaches: &[Beach]) -> anyhow::Result<Vec<BeachForecast>> {
        info!("Preparing the forecast for {} beaches", beaches.len());

        let mut rated = Vec::new();
        for beach in beaches {
            let rating = RatingService::new(beach.position);
            let points = self.source.fetch_points(beach.lat, beach.lng).await?;
            debug!(beach = %beach.name, points = points.len(), "Forecast points received");

            rated.extend(enrich_beach_data(points, beach, &rating));
        }

        Ok(rated)
    }
}

fn enrich_beach_data(
    points: Vec<ForecastPoint>,
    beach: &Beach,
    rating: &RatingService,
) -> Vec<BeachForecast> {
    points
        .into_iter()
        .map(|point| {
            let score = rating.rate_point(&point);
            BeachForecast::new(beach, score, point)
        })
        .collect()
}

/// Groups points by exact timestamp, keeping first-seen order for the groups
/// and insertion order inside each group.
fn map_forecast_by_time(forecast: Vec<BeachForecast>) -> Vec<TimeForecast> {
    let mut groups: Vec<TimeForecast> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for point in forecast {
        match index.get(&point.time) {
            Some(&i) => groups[i].forecast.push(point),
            None => {
                index.insert(point.time.clone(), groups.len());
                groups.push(TimeForecast {
                    time: point.time.clone(),
                    forecast: vec![point],
                });
            }
        }
    }

    groups
}
