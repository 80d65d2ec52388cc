use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::StormGlassError;
use super::types::{StormGlassForecastResponse, normalize_response};
use crate::config::StormGlassConfig;
use crate::fetch::{self, HttpClient};
use crate::models::ForecastPoint;
use crate::services::forecast_source::ForecastSource;

/// Parameters requested for every point.
pub const API_PARAMS: &str =
    "swellDirection,swellHeight,swellPeriod,waveDirection,waveHeight,windDirection,windSpeed";

pub struct StormGlass<C> {
    client: C,
    api_url: String,
    source: String,
}

impl<C: HttpClient> StormGlass<C> {
    /// `client` is expected to carry the API token already (see
    /// [`crate::fetch::auth::ApiKey`]).
    pub fn new(client: C, config: &StormGlassConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            source: config.source.clone(),
        }
    }

    /// Fetches and normalizes the forecast for one location.
    #[tracing::instrument(skip(self), fields(source = %self.source))]
    pub async fn fetch_points(&self, lat: f64, lng: f64) -> Result<Vec<ForecastPoint>, StormGlassError> {
        let url = fetch::build_url(
            &self.api_url,
            "weather/point",
            &[
                ("lat", lat.to_string()),
                ("lng", lng.to_string()),
                ("params", API_PARAMS.to_string()),
                ("source", self.source.clone()),
            ],
        )
        .map_err(|e| StormGlassError::ClientRequest(e.to_string()))?;

        let response = fetch::get(&self.client, url)
            .await
            .map_err(|e| StormGlassError::ClientRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                warn!(error = %e, %status, "Failed to read StormGlass error body");
                String::new()
            });
            return Err(response_error(status, body));
        }

        let raw: StormGlassForecastResponse = response
            .json()
            .await
            .map_err(|e| StormGlassError::ClientRequest(e.to_string()))?;

        let total = raw.hours.len();
        let points = normalize_response(raw, &self.source);
        if points.len() < total {
            warn!(dropped = total - points.len(), "Incomplete StormGlass points dropped");
        }
        debug!(points = points.len(), "StormGlass points normalized");

        Ok(points)
    }
}

fn response_error(status: StatusCode, body: String) -> StormGlassError {
    StormGlassError::Response {
        status: status.as_u16(),
        body,
    }
}

#[async_trait]
impl<C: HttpClient> ForecastSource for StormGlass<C> {
    async fn fetch_points(&self, lat: f64, lng: f64) -> Result<Vec<ForecastPoint>> {
        Ok(StormGlass::fetch_points(self, lat, lng).await?)
    }
}
