#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the ipaws-map server.
//!
//! These types define the JSON contract between the server and the map
//! frontend. They are separate from the feed-facing alert models so the
//! API can evolve independently of the archive's shape.

use chrono::NaiveDate;
use ipaws_map_geometry::{BoundarySet, LatLng, Marker};
use serde::{Deserialize, Serialize};

/// `GET /api/health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    pub healthy: bool,
    pub version: String,
}

/// Query parameters shared by the alert-window endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertQueryParams {
    /// Start of the date window (inclusive, `YYYY-MM-DD`).
    pub from: NaiveDate,
    /// End of the date window (inclusive, `YYYY-MM-DD`).
    pub to: NaiveDate,
    /// Optional viewport as `west,south,east,north`.
    pub bbox: Option<String>,
    /// Optional record cap for the archive request.
    pub limit: Option<u64>,
}

/// Query parameters for the boundaries endpoint: an alert window plus
/// the identifier of the alert to extract geometry for.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryQueryParams {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// CAP identifier of the selected alert.
    pub id: String,
}

/// Query parameters for the geocoding endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeQueryParams {
    pub postal_code: String,
}

/// One map pin as returned by `GET /api/markers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMarker {
    /// Key unique within one response, stable across identical requests.
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// CAP identifier of the owning alert.
    pub alert_id: String,
    /// Headline of the alert's first info block, when present.
    pub headline: Option<String>,
}

impl From<&Marker<'_>> for ApiMarker {
    fn from(marker: &Marker<'_>) -> Self {
        Self {
            id: marker.id.clone(),
            latitude: marker.position.latitude,
            longitude: marker.position.longitude,
            alert_id: marker.alert.identifier.clone(),
            headline: marker
                .alert
                .info
                .first()
                .and_then(|info| info.headline.clone()),
        }
    }
}

/// `GET /api/boundaries` response: the renderable shapes of one alert
/// plus the point list a map uses to fit its viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBoundaries {
    #[serde(flatten)]
    pub boundaries: BoundarySet,
    /// All ring vertices and disc centers, for zoom-to-fit.
    pub bounding_points: Vec<LatLng>,
}

impl From<BoundarySet> for ApiBoundaries {
    fn from(boundaries: BoundarySet) -> Self {
        let bounding_points = boundaries.bounding_points();
        Self {
            boundaries,
            bounding_points,
        }
    }
}
