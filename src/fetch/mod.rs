//! HTTP transport used by the forecast providers.

mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::Result;
use reqwest::{Method, Request, Response, Url};

/// Sends a GET for `url` through `client`.
pub async fn get<C: HttpClient>(client: &C, url: Url) -> reqwest::Result<Response> {
    client.execute(Request::new(Method::GET, url)).await
}

/// Builds `base` + `path` with the given query pairs appended.
pub fn build_url(base: &str, path: &str, query: &[(&str, String)]) -> Result<Url> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    let url = Url::parse_with_params(&joined, query.iter().map(|(k, v)| (*k, v.as_str())))?;
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_joins_and_encodes() {
        let url = build_url(
            "https://api.stormglass.io/v2/",
            "/weather/point",
            &[("lat", "-33.79".to_string()), ("params", "a,b".to_string())],
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.stormglass.io/v2/weather/point?lat=-33.79&params=a%2Cb"
        );
    }

    #[test]
    fn test_build_url_rejects_garbage_base() {
        assert!(build_url("not a url", "weather/point", &[]).is_err());
    }
}
