use crate::models::{AlertFeature, ForecastPeriod, GeocodeMapsPlace};

const UNKNOWN: &str = "Unknown";

/// The field's text, unless it is absent or empty
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Formats a single alert as a block of `Key: value` lines ending in `---`
pub fn format_alert(feature: &AlertFeature) -> String {
    let props = &feature.properties;
    [
        format!("Event: {}", present(&props.event).unwrap_or(UNKNOWN)),
        format!("Area: {}", present(&props.area_desc).unwrap_or(UNKNOWN)),
        format!("Severity: {}", present(&props.severity).unwrap_or(UNKNOWN)),
        format!("Status: {}", present(&props.status).unwrap_or(UNKNOWN)),
        format!("Headline: {}", present(&props.headline).unwrap_or("No headline")),
        "---".to_string(),
    ]
    .join("\n")
}

/// Formats the alerts of a state into a human-readable string
pub fn format_alerts(state: &str, features: &[AlertFeature]) -> String {
    if features.is_empty() {
        return format!("No active alerts for {}", state);
    }

    let alerts: Vec<String> = features.iter().map(format_alert).collect();
    format!("Active alerts for {}:\n\n{}", state, alerts.join("\n"))
}

/// Formats a single forecast period; the details line is omitted when empty
pub fn format_forecast_period(period: &ForecastPeriod) -> String {
    let temperature = period
        .temperature
        .map(|t| t.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let mut lines = vec![
        format!("{}:", present(&period.name).unwrap_or(UNKNOWN)),
        format!(
            "Temperature: {}\u{00b0}{}",
            temperature,
            present(&period.temperature_unit).unwrap_or("F")
        ),
        format!(
            "Wind: {} {}",
            present(&period.wind_speed).unwrap_or(UNKNOWN),
            period.wind_direction.as_deref().unwrap_or("")
        ),
        format!(
            "Forecast: {}",
            present(&period.short_forecast).unwrap_or("No forecast available")
        ),
    ];
    if let Some(details) = present(&period.detailed_forecast) {
        lines.push(format!("Details: {}", details));
    }
    lines.push("---".to_string());
    lines.join("\n")
}

/// Formats forecast periods under the given heading
pub fn format_forecast(heading: &str, periods: &[ForecastPeriod]) -> String {
    let periods: Vec<String> = periods.iter().map(format_forecast_period).collect();
    format!("{}:\n\n{}", heading, periods.join("\n"))
}

/// Coordinates lookup result
pub fn format_coordinates(place: &GeocodeMapsPlace, latitude: f64, longitude: f64) -> String {
    format!(
        "Location: {}\nCoordinates: {}, {}",
        place.display_name, latitude, longitude
    )
}

/// Geocoded location outside NWS coverage
pub fn format_non_us_location(place: &GeocodeMapsPlace, latitude: f64, longitude: f64) -> String {
    format!(
        "Location found: {}\nCoordinates: {}, {}\n\n\
         Note: Weather forecast is only available for US locations through the National \
         Weather Service API. For international locations, you may need to use a different \
         weather service.",
        place.display_name, latitude, longitude
    )
}

/// `"{city}"` or `"{city}", {state}` as quoted in not-found messages
pub fn quoted_place(city: &str, state: Option<&str>) -> String {
    match state {
        Some(state) => format!("\"{}\", {}", city, state),
        None => format!("\"{}\"", city),
    }
}
