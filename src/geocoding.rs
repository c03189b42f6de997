//! Free-text location lookups against the two geocoders.
//!
//! geocode.maps.co is the primary source and covers the whole world. The NWS
//! address geocoder only knows US addresses and is consulted as a fallback.

use crate::client::{endpoint, fetch, JsonFetcher, Upstream};
use crate::config::WeatherConfig;
use crate::constants::{US_MARKERS, US_QUERY_SUFFIX};
use crate::models::{GeocodeMapsPlace, NwsGeocodingFeature, NwsGeocodingResponse};

/// First usable result of the primary geocoder
#[derive(Debug)]
pub struct Place {
    pub details: GeocodeMapsPlace,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    /// Whether the display name marks this place as inside the United States
    pub fn is_us(&self) -> bool {
        is_us_display_name(&self.details.display_name)
    }
}

/// First usable feature of the NWS address geocoder
#[derive(Debug)]
pub struct NwsAddress {
    pub feature: NwsGeocodingFeature,
    pub latitude: f64,
    pub longitude: f64,
}

/// Case-sensitive substring match against the US markers
pub fn is_us_display_name(display_name: &str) -> bool {
    US_MARKERS.iter().any(|marker| display_name.contains(marker))
}

/// `city` or `city, state`
pub fn place_query(city: &str, state: Option<&str>) -> String {
    match state {
        Some(state) => format!("{}, {}", city, state),
        None => city.to_string(),
    }
}

/// Looks `query` up with geocode.maps.co; `None` on any failure or empty result
pub async fn search_place(
    fetcher: &dyn JsonFetcher,
    config: &WeatherConfig,
    query: &str,
) -> Option<Place> {
    let mut params = vec![("q", query)];
    if let Some(key) = config.geocode_api_key.as_deref() {
        params.push(("api_key", key));
    }

    let url = match endpoint(&config.geocode_api_base, "/search", &params) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("Error making geocode request: {}", e);
            return None;
        }
    };

    let places = match fetch::<Vec<GeocodeMapsPlace>>(fetcher, Upstream::Geocoder, &url).await {
        Ok(places) => places,
        Err(e) => {
            tracing::error!("Error making geocode request: {}", e);
            return None;
        }
    };

    let details = places.into_iter().next()?;
    let Some((latitude, longitude)) = details.coordinates() else {
        tracing::warn!(
            "Geocode result for {:?} has unusable coordinates: {}, {}",
            query,
            details.lat,
            details.lon
        );
        return None;
    };

    tracing::debug!(
        "Geocoded {:?} to {} ({:?} {:?}, {:?}/{:?}, importance {:?})",
        query,
        details.display_name,
        details.osm_type,
        details.place_id,
        details.class,
        details.kind,
        details.importance
    );

    Some(Place {
        details,
        latitude,
        longitude,
    })
}

/// Looks `city[, state], USA` up with the NWS address geocoder
pub async fn search_nws_address(
    fetcher: &dyn JsonFetcher,
    config: &WeatherConfig,
    city: &str,
    state: Option<&str>,
) -> Option<NwsAddress> {
    let query = format!("{}{}", place_query(city, state), US_QUERY_SUFFIX);

    let params = [("q", query.as_str())];
    let url = match endpoint(&config.nws_api_base, "/geocoding/addresses", &params) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("Error making NWS request: {}", e);
            return None;
        }
    };

    let response = match fetch::<NwsGeocodingResponse>(fetcher, Upstream::Nws, &url).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Error making NWS request: {}", e);
            return None;
        }
    };

    let feature = response.features.into_iter().next()?;
    let (latitude, longitude) = feature.geometry.lat_lon()?;

    tracing::debug!(
        "NWS geocoded {:?} to {:?}, {:?} ({:?})",
        query,
        feature.properties.name,
        feature.properties.state,
        feature.properties.country
    );

    Some(NwsAddress {
        feature,
        latitude,
        longitude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_us_markers() {
        assert!(is_us_display_name("New York, New York, United States"));
        assert!(is_us_display_name("Austin, TX, USA"));
        assert!(is_us_display_name("Honolulu, HI, US"));
        assert!(!is_us_display_name("London, Greater London, England, United Kingdom"));
        assert!(!is_us_display_name("Tokyo, Japan"));
    }

    #[test]
    fn test_us_marker_is_case_sensitive() {
        assert!(!is_us_display_name("Usti nad Labem, Czechia"));
    }

    #[test]
    fn test_place_query() {
        assert_eq!(place_query("Los Angeles", Some("CA")), "Los Angeles, CA");
        assert_eq!(place_query("London", None), "London");
    }
}
