//! StormGlass point-weather client.
//!
//! [`StormGlass`] implements [`crate::services::forecast_source::ForecastSource`]
//! on top of any [`crate::fetch::HttpClient`]. Raw hours are normalized to
//! [`crate::models::ForecastPoint`] using a single data source (`noaa` by
//! default) and incomplete hours are dropped.

mod client;
mod types;

pub use client::StormGlass;
pub use types::{StormGlassForecastResponse, StormGlassPoint, normalize_response};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StormGlassError {
    /// The request never produced a usable response (transport or decoding).
    #[error("Unexpected error when trying to communicate to StormGlass: {0}")]
    ClientRequest(String),
    /// StormGlass answered with a non-success status.
    #[error("Unexpected error returned by the StormGlass service: Error: {body} Code: {status}")]
    Response { status: u16, body: String },
}
