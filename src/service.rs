use anyhow::Result;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use reqwest::Url;
use std::sync::Arc;

use crate::client::{endpoint, fetch, HttpFetcher, JsonFetcher, Upstream};
use crate::config::WeatherConfig;
use crate::error::ForecastFailure;
use crate::formatters::{
    format_alerts, format_coordinates, format_forecast, format_non_us_location, present,
    quoted_place,
};
use crate::geocoding::{place_query, search_nws_address, search_place};
use crate::models::{
    AlertResponse, ForecastPeriod, ForecastResponse, GetAlertsRequest, GetCoordinatesByCityRequest,
    GetForecastByCityRequest, GetForecastRequest, PointsResponse,
};

/// Main weather service that handles MCP requests
#[derive(Clone)]
pub struct Weather {
    fetcher: Arc<dyn JsonFetcher>,
    config: Arc<WeatherConfig>,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a Weather service talking to the real upstream APIs
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(Arc::new(fetcher), config))
    }

    /// Creates a Weather service on top of any fetcher
    pub fn with_fetcher(fetcher: Arc<dyn JsonFetcher>, config: WeatherConfig) -> Self {
        Self {
            fetcher,
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }

    /// Active alerts for a state code, as text
    pub async fn alerts_text(&self, state: &str) -> String {
        let state = state.to_uppercase();

        let alerts = match endpoint(
            &self.config.nws_api_base,
            "/alerts",
            &[("area", state.as_str())],
        ) {
            Ok(url) => self.nws::<AlertResponse>(&url).await,
            Err(e) => {
                tracing::error!("Error making NWS request: {}", e);
                None
            }
        };

        match alerts {
            Some(alerts) => format_alerts(&state, &alerts.features),
            None => "Failed to retrieve alerts data".to_string(),
        }
    }

    /// NWS forecast for a coordinate pair, as text
    pub async fn forecast_text(&self, latitude: f64, longitude: f64) -> String {
        match self.grid_forecast(latitude, longitude).await {
            Ok(periods) => format_forecast(
                &format!("Forecast for {}, {}", latitude, longitude),
                &periods,
            ),
            Err(ForecastFailure::GridPoint) => format!(
                "Failed to retrieve grid point data for coordinates: {}, {}. \
                 This location may not be supported by the NWS API (only US locations are supported).",
                latitude, longitude
            ),
            Err(failure) => failure.to_string(),
        }
    }

    /// Geocodes a city and forecasts it when it lies in the US
    pub async fn forecast_by_city_text(&self, city: &str, state: Option<&str>) -> String {
        let query = place_query(city, state);

        if let Some(place) = search_place(self.fetcher.as_ref(), &self.config, &query).await {
            if place.is_us() {
                tracing::debug!("{} classified as US location", place.details.display_name);
                return self.forecast_text(place.latitude, place.longitude).await;
            }
            tracing::debug!("{} classified as non-US location", place.details.display_name);
            return format_non_us_location(&place.details, place.latitude, place.longitude);
        }

        tracing::warn!("Primary geocoder found nothing for {:?}, trying NWS geocoder", query);

        let address = search_nws_address(self.fetcher.as_ref(), &self.config, city, state).await;
        let Some(address) = address else {
            return format!(
                "Could not find location for {}. Please check the city name and try again.",
                quoted_place(city, state)
            );
        };

        let properties = &address.feature.properties;
        let name = present(&properties.name).unwrap_or(city);
        let region = present(&properties.state).or(state).unwrap_or("Unknown");

        match self.grid_forecast(address.latitude, address.longitude).await {
            Ok(periods) => format_forecast(
                &format!("Weather Forecast for {}, {}", name, region),
                &periods,
            ),
            Err(ForecastFailure::GridPoint) => format!(
                "Failed to retrieve weather data for {}, {}. \
                 This location may not be supported by the NWS API (only US locations are supported).",
                name, region
            ),
            Err(failure) => failure.to_string(),
        }
    }

    /// Coordinates of a city from the primary geocoder, as text
    pub async fn coordinates_by_city_text(&self, city: &str, state: Option<&str>) -> String {
        let query = place_query(city, state);

        match search_place(self.fetcher.as_ref(), &self.config, &query).await {
            Some(place) => format_coordinates(&place.details, place.latitude, place.longitude),
            None => format!(
                "Could not find coordinates for {}. Please check the city name and try again.",
                quoted_place(city, state)
            ),
        }
    }

    /// Grid point lookup followed by the forecast it points at
    async fn grid_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<ForecastPeriod>, ForecastFailure> {
        let points_url = endpoint(
            &self.config.nws_api_base,
            &format!("/points/{:.4},{:.4}", latitude, longitude),
            &[],
        )
        .map_err(|e| {
            tracing::error!("Error making NWS request: {}", e);
            ForecastFailure::GridPoint
        })?;

        let points = self
            .nws::<PointsResponse>(&points_url)
            .await
            .ok_or(ForecastFailure::GridPoint)?;

        if let Some(relative) = &points.properties.relative_location {
            tracing::debug!(
                "Grid point near {:?}, {:?}",
                relative.properties.city,
                relative.properties.state
            );
        }

        let forecast_url =
            present(&points.properties.forecast).ok_or(ForecastFailure::MissingForecastUrl)?;

        let forecast_url = Url::parse(forecast_url).map_err(|e| {
            tracing::error!("Error making NWS request: bad forecast URL {}: {}", forecast_url, e);
            ForecastFailure::Forecast
        })?;

        let forecast = self
            .nws::<ForecastResponse>(&forecast_url)
            .await
            .ok_or(ForecastFailure::Forecast)?;

        let periods = forecast.properties.periods;
        if periods.is_empty() {
            return Err(ForecastFailure::NoPeriods);
        }
        Ok(periods)
    }

    /// NWS GET; failures are logged and collapse to `None`
    async fn nws<T: serde::de::DeserializeOwned>(&self, url: &Url) -> Option<T> {
        match fetch::<T>(self.fetcher.as_ref(), Upstream::Nws, url).await {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::error!("Error making NWS request: {}", e);
                None
            }
        }
    }
}

fn validate_state_code(state: &str) -> Result<(), McpError> {
    if state.chars().count() != 2 {
        return Err(McpError::invalid_params(
            format!("state must be a two-letter state code, got {:?}", state),
            None,
        ));
    }
    Ok(())
}

fn validate_city(city: &str) -> Result<(), McpError> {
    if city.is_empty() {
        return Err(McpError::invalid_params("city must not be empty", None));
    }
    Ok(())
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), McpError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(McpError::invalid_params(
            format!("latitude must be between -90 and 90, got {}", latitude),
            None,
        ));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(McpError::invalid_params(
            format!("longitude must be between -180 and 180, got {}", longitude),
            None,
        ));
    }
    Ok(())
}

fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "weather-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Weather alerts and forecasts from the National Weather Service API, \
                plus city geocoding. Forecasts are available for US locations only."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    /// Gets weather alerts for a US state
    #[tool(
        name = "get-alerts",
        description = "Get weather alerts for a given state. Provide a two-letter state code (e.g. CA, NY)."
    )]
    async fn get_alerts(
        &self,
        Parameters(request): Parameters<GetAlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting alerts for state: {}", request.state);
        validate_state_code(&request.state)?;

        Ok(text_result(self.alerts_text(&request.state).await))
    }

    /// Gets the NWS forecast for a coordinate pair
    #[tool(
        name = "get-forecast",
        description = "Get weather forecast for a given location by coordinates (e.g. latitude: 40.7128, longitude: -74.0060 for New York). Only US locations are covered by the National Weather Service."
    )]
    async fn get_forecast(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting forecast for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );
        validate_coordinates(request.latitude, request.longitude)?;

        Ok(text_result(
            self.forecast_text(request.latitude, request.longitude).await,
        ))
    }

    /// Gets a forecast for a city, geocoding it first
    #[tool(
        name = "get-forecast-by-city",
        description = "Get weather forecast for a city by name using geocoding and National Weather Service API"
    )]
    async fn get_forecast_by_city(
        &self,
        Parameters(request): Parameters<GetForecastByCityRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting forecast for city: {} ({:?})",
            request.city,
            request.state
        );
        validate_city(&request.city)?;
        if let Some(state) = &request.state {
            validate_state_code(state)?;
        }

        Ok(text_result(
            self.forecast_by_city_text(&request.city, request.state.as_deref())
                .await,
        ))
    }

    /// Gets the coordinates of a city
    #[tool(
        name = "get-coordinates-by-city",
        description = "Get coordinates for a city using geocode.maps.co API"
    )]
    async fn get_coordinates_by_city(
        &self,
        Parameters(request): Parameters<GetCoordinatesByCityRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting coordinates for city: {} ({:?})",
            request.city,
            request.state
        );
        validate_city(&request.city)?;
        let state = request
            .state
            .as_deref()
            .map(str::trim)
            .filter(|state| !state.is_empty());

        Ok(text_result(
            self.coordinates_by_city_text(&request.city, state).await,
        ))
    }
}
