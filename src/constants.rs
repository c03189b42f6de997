/// Default user agent string for HTTP requests
pub const USER_AGENT: &str = "weather-app/1.0";

/// National Weather Service API base URL
pub const NWS_API_BASE: &str = "https://api.weather.gov";

/// geocode.maps.co API base URL
pub const GEOCODE_API_BASE: &str = "https://geocode.maps.co";

/// Accept header value the NWS API expects
pub const GEO_JSON: &str = "application/geo+json";

/// Default upstream request timeout in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Display-name fragments that mark a geocoding result as a US location
pub const US_MARKERS: [&str; 3] = ["United States", "USA", "US"];

/// Suffix appended to queries sent to the NWS geocoder
pub const US_QUERY_SUFFIX: &str = ", USA";
