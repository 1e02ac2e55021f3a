//! Nominatim / `OpenStreetMap` postal-code lookup.
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/>

use crate::{GeoPoint, GeocodeError};

/// Default search endpoint for the public Nominatim instance.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Resolves a US postal code to a single point using the Nominatim
/// structured search endpoint. Returns `Ok(None)` when the code does
/// not match anything.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing
/// fails, or [`GeocodeError::RateLimited`] on HTTP 429.
pub async fn geocode_postal_code(
    client: &reqwest::Client,
    base_url: &str,
    postal_code: &str,
) -> Result<Option<GeoPoint>, GeocodeError> {
    let resp = client
        .get(base_url)
        .query(&[
            ("postalcode", postal_code),
            ("country", "USA"),
            ("format", "json"),
            ("limit", "1"),
        ])
        .send()
        .await?;

    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GeocodeError::RateLimited);
    }

    let body: serde_json::Value = resp.json().await?;
    parse_response(&body)
}

/// Parses the Nominatim JSON response (`lat`/`lon` are strings).
fn parse_response(body: &serde_json::Value) -> Result<Option<GeoPoint>, GeocodeError> {
    let results = body.as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Nominatim response is not an array".to_string(),
    })?;

    let Some(first) = results.first() else {
        return Ok(None);
    };

    let latitude = first["lat"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing lat in Nominatim response".to_string(),
        })?;

    let longitude = first["lon"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing lon in Nominatim response".to_string(),
        })?;

    Ok(Some(GeoPoint {
        latitude,
        longitude,
    }))
}
