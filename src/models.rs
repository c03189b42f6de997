use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// National Weather Service API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AlertResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<AlertFeature>,
}

#[derive(Debug, Deserialize)]
pub struct AlertFeature {
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: AlertProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertProperties {
    pub event: Option<String>,
    #[serde(rename = "areaDesc")]
    pub area_desc: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub headline: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PointsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: PointsProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct PointsProperties {
    /// Absolute URL of the gridpoint forecast
    pub forecast: Option<String>,
    #[serde(rename = "relativeLocation")]
    pub relative_location: Option<RelativeLocation>,
}

#[derive(Debug, Deserialize)]
pub struct RelativeLocation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: RelativeLocationProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct RelativeLocationProperties {
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: ForecastProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastProperties {
    #[serde(default, deserialize_with = "null_as_default")]
    pub periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastPeriod {
    pub name: Option<String>,
    pub temperature: Option<f64>,
    #[serde(rename = "temperatureUnit")]
    pub temperature_unit: Option<String>,
    #[serde(rename = "windSpeed")]
    pub wind_speed: Option<String>,
    #[serde(rename = "windDirection")]
    pub wind_direction: Option<String>,
    #[serde(rename = "shortForecast")]
    pub short_forecast: Option<String>,
    #[serde(rename = "detailedForecast")]
    pub detailed_forecast: Option<String>,
}

/// GeoJSON result of the NWS address geocoder
#[derive(Debug, Deserialize)]
pub struct NwsGeocodingResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<NwsGeocodingFeature>,
}

#[derive(Debug, Deserialize)]
pub struct NwsGeocodingFeature {
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: NwsGeocodingProperties,
    pub geometry: Geometry,
}

#[derive(Debug, Default, Deserialize)]
pub struct NwsGeocodingProperties {
    pub name: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// `[longitude, latitude]`, optionally followed by altitude
    #[serde(default, deserialize_with = "null_as_default")]
    pub coordinates: Vec<f64>,
}

impl Geometry {
    /// `(latitude, longitude)` of the point, if present
    pub fn lat_lon(&self) -> Option<(f64, f64)> {
        match self.coordinates.as_slice() {
            [longitude, latitude, ..] => Some((*latitude, *longitude)),
            _ => None,
        }
    }
}

// ============================================================================
// geocode.maps.co API Models
// ============================================================================

/// One element of the `/search` result array
#[derive(Debug, Deserialize)]
pub struct GeocodeMapsPlace {
    pub place_id: Option<u64>,
    pub osm_type: Option<String>,
    pub lat: String,
    pub lon: String,
    pub display_name: String,
    pub class: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub importance: Option<f64>,
}

impl GeocodeMapsPlace {
    /// Parsed `(latitude, longitude)`, or `None` when either is not a number
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let latitude = self.lat.trim().parse::<f64>().ok()?;
        let longitude = self.lon.trim().parse::<f64>().ok()?;
        (latitude.is_finite() && longitude.is_finite()).then_some((latitude, longitude))
    }
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetAlertsRequest {
    /// Two-letter state code (e.g. CA, NY)
    pub state: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetForecastRequest {
    /// Latitude of the location
    pub latitude: f64,
    /// Longitude of the location
    pub longitude: f64,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetForecastByCityRequest {
    /// City name (e.g. New York, Los Angeles)
    pub city: String,
    /// Two-letter state code (optional, e.g. CA, NY)
    pub state: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetCoordinatesByCityRequest {
    /// City name (e.g. New York, London, Tokyo, Beijing)
    pub city: String,
    /// State or region name (optional)
    pub state: Option<String>,
}
