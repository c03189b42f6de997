//! Runtime configuration read from environment variables.

use anyhow::{Context, Result};
use std::time::Duration;

use crate::constants::{GEOCODE_API_BASE, HTTP_TIMEOUT_SECS, NWS_API_BASE, USER_AGENT};

/// Upstream endpoints and HTTP client settings
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherConfig {
    pub nws_api_base: String,
    pub geocode_api_base: String,
    pub geocode_api_key: Option<String>,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            nws_api_base: NWS_API_BASE.to_string(),
            geocode_api_base: GEOCODE_API_BASE.to_string(),
            geocode_api_key: None,
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
        }
    }
}

impl WeatherConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup, falling back to
    /// defaults for missing or blank values
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();

        let timeout = match get("WEATHER_HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse()
                    .with_context(|| format!("WEATHER_HTTP_TIMEOUT_SECS is not a number: {raw}"))?,
            ),
            None => defaults.timeout,
        };

        Ok(Self {
            nws_api_base: get("WEATHER_NWS_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.nws_api_base),
            geocode_api_base: get("WEATHER_GEOCODE_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.geocode_api_base),
            geocode_api_key: get("GEOCODE_API_KEY"),
            user_agent: get("WEATHER_USER_AGENT").unwrap_or(defaults.user_agent),
            timeout,
        })
    }
}
