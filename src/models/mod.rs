//! Values shared by the rating engine, the forecast source and the output layer.

pub mod beach;
pub mod forecast;

pub use beach::{Beach, GeoPosition};
pub use forecast::{BeachForecast, ForecastPoint, TimeForecast};
