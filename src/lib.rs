pub mod config;
pub mod fetch;
pub mod infra;
pub mod models;
pub mod output;
pub mod services;

pub use models::{Beach, BeachForecast, ForecastPoint, GeoPosition, TimeForecast};
pub use services::forecast::{Forecast, ForecastProcessingError};
pub use services::forecast_source::ForecastSource;
pub use services::rating::RatingService;
