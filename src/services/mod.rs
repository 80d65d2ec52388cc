//! Rating engine, forecast aggregation and the forecast-source seam.

pub mod forecast;
pub mod forecast_source;
pub mod rating;
