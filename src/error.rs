use thiserror::Error;

/// Failures talking to an upstream API
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request failed with status: {0}")]
    Status(u16),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl WeatherError {
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

/// Where the grid point to forecast chain stopped
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ForecastFailure {
    #[error("Failed to retrieve grid point data")]
    GridPoint,

    #[error("Failed to get forecast URL from grid point data")]
    MissingForecastUrl,

    #[error("Failed to retrieve forecast data")]
    Forecast,

    #[error("No forecast periods available")]
    NoPeriods,
}
