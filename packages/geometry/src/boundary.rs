//! Boundary extractor: all renderable shapes of one alert.
//!
//! Used when an alert is selected on the map — the resulting
//! [`BoundarySet`] drives both highlight rendering and the zoom-to-fit
//! viewport (via [`BoundarySet::bounding_points`]). The set is
//! ephemeral: built on demand, discarded when the selection changes.

use ipaws_map_alert_models::Alert;
use serde::{Deserialize, Serialize};

use crate::shape::{Disc, LatLng, Ring, parse_disc, parse_ring};

/// The combined rings and discs extracted from one alert.
///
/// Shapes appear in area order, but rendering treats the set as
/// unordered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundarySet {
    pub rings: Vec<Ring>,
    pub discs: Vec<Disc>,
}

impl BoundarySet {
    /// `true` when the alert contributed no usable geometry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty() && self.discs.is_empty()
    }

    /// Every ring vertex plus every disc center, for fitting a map
    /// viewport around the alert.
    #[must_use]
    pub fn bounding_points(&self) -> Vec<LatLng> {
        let mut points: Vec<LatLng> = self
            .rings
            .iter()
            .flat_map(|ring| ring.points.iter().copied())
            .collect();
        points.extend(self.discs.iter().map(|disc| disc.center));
        points
    }
}

/// Collects every successfully parsed shape across every area of every
/// info block of `alert`, in their given order.
///
/// A missing alert or an alert with no info blocks yields an empty set
/// rather than an error. A single area may contribute both a ring and
/// a disc when both fields are present and individually valid.
#[must_use]
pub fn extract_boundaries(alert: Option<&Alert>) -> BoundarySet {
    let mut set = BoundarySet::default();

    let Some(alert) = alert else {
        return set;
    };

    for area in alert.areas() {
        if let Some(ring) = area.polygon.as_ref().and_then(parse_ring) {
            set.rings.push(ring);
        }
        if let Some(disc) = area.circle.as_ref().and_then(parse_disc) {
            set.discs.push(disc);
        }
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipaws_map_alert_models::{AlertArea, AlertInfo};
    use serde_json::json;

    fn alert_with_areas(areas: Vec<AlertArea>) -> Alert {
        Alert {
            identifier: "test-alert".to_string(),
            info: vec![AlertInfo {
                area: areas,
                ..AlertInfo::default()
            }],
            ..Alert::default()
        }
    }

    #[test]
    fn missing_alert_yields_empty_set() {
        let set = extract_boundaries(None);
        assert!(set.is_empty());
        assert!(set.bounding_points().is_empty());
    }

    #[test]
    fn alert_without_info_yields_empty_set() {
        let alert = Alert::default();
        assert!(extract_boundaries(Some(&alert)).is_empty());
    }

    #[test]
    fn collects_rings_and_discs_across_areas() {
        let alert = alert_with_areas(vec![
            AlertArea {
                polygon: Some(json!({
                    "coordinates": [[[-100.0, 40.0], [-100.0, 41.0], [-99.0, 40.0]]]
                })),
                ..AlertArea::default()
            },
            AlertArea {
                circle: Some(json!({ "coordinates": [-105.0, 39.0], "radius": 5 })),
                ..AlertArea::default()
            },
        ]);

        let set = extract_boundaries(Some(&alert));
        assert_eq!(set.rings.len(), 1);
        assert_eq!(set.discs.len(), 1);
        // 3 ring vertices + 1 disc center
        assert_eq!(set.bounding_points().len(), 4);
    }

    #[test]
    fn one_area_may_contribute_both_shapes() {
        let alert = alert_with_areas(vec![AlertArea {
            polygon: Some(json!({
                "coordinates": [[[-100.0, 40.0], [-100.0, 41.0], [-99.0, 40.0]]]
            })),
            circle: Some(json!({ "coordinates": [-105.0, 39.0], "radius": 2 })),
            ..AlertArea::default()
        }]);

        let set = extract_boundaries(Some(&alert));
        assert_eq!(set.rings.len(), 1);
        assert_eq!(set.discs.len(), 1);
    }

    #[test]
    fn malformed_geometry_is_dropped_silently() {
        let alert = alert_with_areas(vec![
            AlertArea {
                polygon: Some(json!("not geometry")),
                circle: Some(json!({ "coordinates": [-105.0, 39.0], "radius": -1 })),
                ..AlertArea::default()
            },
            AlertArea {
                circle: Some(json!({ "coordinates": [-105.0, 39.0], "radius": 5 })),
                ..AlertArea::default()
            },
        ]);

        let set = extract_boundaries(Some(&alert));
        assert!(set.rings.is_empty());
        assert_eq!(set.discs.len(), 1);
    }
}
