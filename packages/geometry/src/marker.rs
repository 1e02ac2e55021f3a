//! Marker reducer: one representative point per geographic sub-area.
//!
//! Each usable area of each alert collapses to a single map-pin
//! position. Polygon areas use the arithmetic mean of the ring's
//! vertices — not a true area-weighted centroid, it is biased toward
//! vertex-dense stretches of the boundary, but it matches what the map
//! has always shown and is cheap. Circle areas use the disc center.

use ipaws_map_alert_models::{Alert, AlertArea};

use crate::shape::{LatLng, parse_disc, parse_ring};

/// A map pin: a representative position for one geographic sub-area,
/// borrowing the alert it belongs to. Multiple markers may reference
/// the same alert.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker<'a> {
    /// Deterministic key, unique within one derivation batch:
    /// `{alert identifier}-{info index}-{area index}`.
    pub id: String,
    pub position: LatLng,
    pub alert: &'a Alert,
}

/// Reduces every geographic sub-area across `alerts` to a flat marker
/// list, in alert → info → area iteration order.
///
/// Areas with no usable center contribute nothing; an alert whose
/// areas all fail simply has no markers. Markers are not deduplicated.
#[must_use]
pub fn derive_markers(alerts: &[Alert]) -> Vec<Marker<'_>> {
    let mut markers = Vec::new();

    for alert in alerts {
        for (info_idx, info) in alert.info.iter().enumerate() {
            for (area_idx, area) in info.area.iter().enumerate() {
                if let Some(position) = area_center(area) {
                    markers.push(Marker {
                        id: format!("{}-{info_idx}-{area_idx}", alert.identifier),
                        position,
                        alert,
                    });
                }
            }
        }
    }

    markers
}

/// Computes the representative center of one area: polygon vertex mean
/// when the polygon parses, else the circle center, else nothing.
#[must_use]
pub fn area_center(area: &AlertArea) -> Option<LatLng> {
    if let Some(ring) = area.polygon.as_ref().and_then(parse_ring) {
        #[allow(clippy::cast_precision_loss)]
        let count = ring.points.len() as f64;
        let latitude = ring.points.iter().map(|p| p.latitude).sum::<f64>() / count;
        let longitude = ring.points.iter().map(|p| p.longitude).sum::<f64>() / count;
        return Some(LatLng {
            latitude,
            longitude,
        });
    }

    area.circle
        .as_ref()
        .and_then(parse_disc)
        .map(|disc| disc.center)
}
