//! Process configuration read from environment variables (optionally from a
//! `.env` file loaded by the binary).

use anyhow::{Context, Result, anyhow};

pub const DEFAULT_API_URL: &str = "https://api.stormglass.io/v2";
pub const DEFAULT_SOURCE: &str = "noaa";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILE_PATH: &str = "logs/surf_forecast.log";

#[derive(Debug, Clone, PartialEq)]
pub struct StormGlassConfig {
    pub api_url: String,
    pub api_token: String,
    pub source: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub stormglass: StormGlassConfig,
    pub log_file_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable lookup.
    ///
    /// `STORMGLASS_API_TOKEN` is required; everything else has a default.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = var("STORMGLASS_API_TOKEN")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| anyhow!("STORMGLASS_API_TOKEN must be set"))?;

        let timeout_secs = match var("STORMGLASS_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("STORMGLASS_TIMEOUT_SECS is not a number: '{raw}'"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            stormglass: StormGlassConfig {
                api_url: var("STORMGLASS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                api_token,
                source: var("STORMGLASS_SOURCE").unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
                timeout_secs,
            },
            log_file_path: var("LOG_FILE_PATH")
                .unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string()),
        })
    }
}

/// Log file location when the full config is not needed (or not valid yet).
pub fn log_file_path() -> String {
    std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE_PATH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(lookup(&[("STORMGLASS_API_TOKEN", "fake-token")])).unwrap();

        assert_eq!(config.stormglass.api_url, DEFAULT_API_URL);
        assert_eq!(config.stormglass.api_token, "fake-token");
        assert_eq!(config.stormglass.source, "noaa");
        assert_eq!(config.stormglass.timeout_secs, 30);
        assert_eq!(config.log_file_path, DEFAULT_LOG_FILE_PATH);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(lookup(&[
            ("STORMGLASS_API_TOKEN", "t"),
            ("STORMGLASS_API_URL", "http://localhost:8080"),
            ("STORMGLASS_SOURCE", "sg"),
            ("STORMGLASS_TIMEOUT_SECS", "5"),
            ("LOG_FILE_PATH", "/tmp/surf.log"),
        ]))
        .unwrap();

        assert_eq!(config.stormglass.api_url, "http://localhost:8080");
        assert_eq!(config.stormglass.source, "sg");
        assert_eq!(config.stormglass.timeout_secs, 5);
        assert_eq!(config.log_file_path, "/tmp/surf.log");
    }

    #[test]
    fn test_missing_token() {
        let err = Config::from_vars(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("STORMGLASS_API_TOKEN"));

        assert!(Config::from_vars(lookup(&[("STORMGLASS_API_TOKEN", "")])).is_err());
    }

    #[test]
    fn test_bad_timeout() {
        let err = Config::from_vars(lookup(&[
            ("STORMGLASS_API_TOKEN", "t"),
            ("STORMGLASS_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("STORMGLASS_TIMEOUT_SECS"));
    }
}
