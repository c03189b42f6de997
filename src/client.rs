use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, ClientBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::WeatherConfig;
use crate::constants::GEO_JSON;
use crate::error::WeatherError;

/// Which upstream API a request targets; decides the headers sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Nws,
    Geocoder,
}

/// Performs a GET and returns the JSON body of a successful response
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn get_json(&self, upstream: Upstream, url: &Url) -> Result<Value, WeatherError>;
}

/// `JsonFetcher` backed by a shared reqwest client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &WeatherConfig) -> anyhow::Result<Self> {
        Self::with_builder(Client::builder(), config)
    }

    fn with_builder(builder: ClientBuilder, config: &WeatherConfig) -> anyhow::Result<Self> {
        let client = builder
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn get_json(&self, upstream: Upstream, url: &Url) -> Result<Value, WeatherError> {
        let mut request = self.client.get(url.clone());
        if upstream == Upstream::Nws {
            request = request.header(ACCEPT, GEO_JSON);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Fetches `url` and deserializes the body into `T`
pub async fn fetch<T: DeserializeOwned>(
    fetcher: &dyn JsonFetcher,
    upstream: Upstream,
    url: &Url,
) -> Result<T, WeatherError> {
    tracing::debug!("GET {} ({:?})", url, upstream);
    let value = fetcher.get_json(upstream, url).await?;
    Ok(serde_json::from_value(value)?)
}

/// Joins `base` and `path` and appends url-encoded query parameters
pub fn endpoint(base: &str, path: &str, params: &[(&str, &str)]) -> Result<Url, WeatherError> {
    let raw = format!("{base}{path}");
    let parsed = if params.is_empty() {
        Url::parse(&raw)
    } else {
        Url::parse_with_params(&raw, params)
    };
    parsed.map_err(|e| WeatherError::invalid_url(raw, e))
}
