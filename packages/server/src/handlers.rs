//! HTTP handler functions for the ipaws-map API.

use actix_web::{HttpResponse, web};
use ipaws_map_geometry::{ViewportBounds, derive_markers, extract_boundaries};
use ipaws_map_server_models::{
    AlertQueryParams, ApiBoundaries, ApiHealth, ApiMarker, BoundaryQueryParams, GeocodeQueryParams,
};
use ipaws_map_source::{FetchOptions, ipaws};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/alerts`
///
/// Fetches the archive window, optionally narrowed to a `bbox`
/// viewport, and returns the alert records.
pub async fn alerts(
    state: web::Data<AppState>,
    params: web::Query<AlertQueryParams>,
) -> HttpResponse {
    let options = match fetch_options(&params) {
        Ok(options) => options,
        Err(response) => return response,
    };

    match ipaws::fetch_alerts(&state.client, &options).await {
        Ok(alerts) => HttpResponse::Ok().json(alerts),
        Err(e) => upstream_failure("fetch alerts", &e),
    }
}

/// `GET /api/markers`
///
/// Fetches the archive window and reduces every geographic sub-area to
/// a map pin.
pub async fn markers(
    state: web::Data<AppState>,
    params: web::Query<AlertQueryParams>,
) -> HttpResponse {
    let options = match fetch_options(&params) {
        Ok(options) => options,
        Err(response) => return response,
    };

    match ipaws::fetch_alerts(&state.client, &options).await {
        Ok(alerts) => {
            let pins: Vec<ApiMarker> = derive_markers(&alerts)
                .iter()
                .map(ApiMarker::from)
                .collect();
            HttpResponse::Ok().json(pins)
        }
        Err(e) => upstream_failure("derive markers", &e),
    }
}

/// `GET /api/boundaries`
///
/// Returns the boundary geometry and zoom bounding points for the
/// alert with the requested identifier. An alert that is absent from
/// the window (or carries no usable geometry) yields an empty set.
pub async fn boundaries(
    state: web::Data<AppState>,
    params: web::Query<BoundaryQueryParams>,
) -> HttpResponse {
    let options = FetchOptions::new(params.from, params.to);

    match ipaws::fetch_alerts(&state.client, &options).await {
        Ok(alerts) => {
            let selected = alerts.iter().find(|a| a.identifier == params.id);
            let set = extract_boundaries(selected);
            HttpResponse::Ok().json(ApiBoundaries::from(set))
        }
        Err(e) => upstream_failure("extract boundaries", &e),
    }
}

/// `GET /api/geocode`
pub async fn geocode(
    state: web::Data<AppState>,
    params: web::Query<GeocodeQueryParams>,
) -> HttpResponse {
    match ipaws_map_geocoder::nominatim::geocode_postal_code(
        &state.client,
        &state.nominatim_url,
        &params.postal_code,
    )
    .await
    {
        Ok(Some(point)) => HttpResponse::Ok().json(serde_json::json!({
            "latitude": point.latitude,
            "longitude": point.longitude,
        })),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("no match for postal code {}", params.postal_code)
        })),
        Err(ipaws_map_geocoder::GeocodeError::RateLimited) => {
            HttpResponse::TooManyRequests().json(serde_json::json!({
                "error": "geocoder rate limit exceeded"
            }))
        }
        Err(e) => {
            log::error!("Failed to geocode: {e}");
            HttpResponse::BadGateway().json(serde_json::json!({
                "error": "geocoding failed"
            }))
        }
    }
}

/// Builds [`FetchOptions`] from the shared query parameters, turning a
/// malformed `bbox` into a 400 response.
fn fetch_options(params: &AlertQueryParams) -> Result<FetchOptions, HttpResponse> {
    let mut options = FetchOptions::new(params.from, params.to);
    if let Some(limit) = params.limit {
        options.limit = limit;
    }

    if let Some(raw) = params.bbox.as_deref() {
        match raw.parse::<ViewportBounds>() {
            Ok(bounds) => options = options.with_bounds(bounds),
            Err(e) => {
                return Err(HttpResponse::BadRequest().json(serde_json::json!({
                    "error": e.to_string()
                })));
            }
        }
    }

    Ok(options)
}

/// Logs an upstream archive failure once and maps it to a 502.
fn upstream_failure(context: &str, e: &ipaws_map_source::SourceError) -> HttpResponse {
    log::error!("Failed to {context}: {e}");
    HttpResponse::BadGateway().json(serde_json::json!({
        "error": "alert archive request failed"
    }))
}
