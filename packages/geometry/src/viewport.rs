//! Viewport filter: which alerts intersect a rectangular map view.
//!
//! The test is deliberately coarse: an alert matches when any ring
//! vertex or disc center lies inside the rectangle. A polygon that
//! surrounds the viewport without putting a vertex inside it will not
//! match — that is a documented limitation of the point containment
//! approach, not a bug, and upgrading to true polygon/rectangle
//! intersection would be a semantic change.

use ipaws_map_alert_models::Alert;
use serde::{Deserialize, Serialize};

use crate::shape::{LatLng, parse_disc, parse_ring};

/// A rectangular geographic viewport in degrees.
///
/// `south <= north` is expected (a viewport violating it contains
/// nothing). `west > east` means the viewport crosses the
/// anti-meridian and longitude matching wraps around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl ViewportBounds {
    /// `true` when `west > east`, i.e. the viewport wraps across the
    /// anti-meridian.
    #[must_use]
    pub const fn crosses_antimeridian(&self) -> bool {
        self.west > self.east
    }

    /// Inclusive point-in-rectangle containment: points exactly on an
    /// edge count as inside.
    #[must_use]
    pub const fn contains(&self, point: LatLng) -> bool {
        if point.latitude < self.south || point.latitude > self.north {
            return false;
        }
        if self.crosses_antimeridian() {
            point.longitude >= self.west || point.longitude <= self.east
        } else {
            point.longitude >= self.west && point.longitude <= self.east
        }
    }
}

/// Error returned when parsing a `west,south,east,north` bounds string
/// fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBoundsError {
    /// The string that failed to parse.
    pub input: String,
}

impl std::fmt::Display for ParseBoundsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid bounds {:?}: expected 'west,south,east,north'",
            self.input
        )
    }
}

impl std::error::Error for ParseBoundsError {}

impl std::str::FromStr for ViewportBounds {
    type Err = ParseBoundsError;

    /// Parses the `west,south,east,north` form used by the API's
    /// `bbox` query parameter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseBoundsError {
            input: s.to_string(),
        };
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| err())?;
        let [west, south, east, north] = parts.as_slice() else {
            return Err(err());
        };
        Ok(Self {
            north: *north,
            south: *south,
            east: *east,
            west: *west,
        })
    }
}

/// Returns the alerts with at least one shape touching `bounds`, in
/// input order.
///
/// Pure and re-entrant: the same inputs always produce the same subset
/// in the same relative order, so filtering an already-filtered list
/// is a no-op.
#[must_use]
pub fn filter_by_viewport<'a>(alerts: &'a [Alert], bounds: &ViewportBounds) -> Vec<&'a Alert> {
    alerts
        .iter()
        .filter(|alert| alert_matches(alert, bounds))
        .collect()
}

/// `true` when any of the alert's areas has a ring vertex or disc
/// center inside `bounds`. An alert with no info/area data never
/// matches.
#[must_use]
pub fn alert_matches(alert: &Alert, bounds: &ViewportBounds) -> bool {
    alert.areas().any(|area| {
        if let Some(ring) = area.polygon.as_ref().and_then(parse_ring)
            && ring.points.iter().any(|point| bounds.contains(*point))
        {
            return true;
        }
        area.circle
            .as_ref()
            .and_then(parse_disc)
            .is_some_and(|disc| bounds.contains(disc.center))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipaws_map_alert_models::{AlertArea, AlertInfo};
    use serde_json::json;

    fn polygon_alert(identifier: &str) -> Alert {
        Alert {
            identifier: identifier.to_string(),
            info: vec![AlertInfo {
                area: vec![AlertArea {
                    polygon: Some(json!({
                        "coordinates": [[[-100.0, 40.0], [-100.0, 41.0], [-99.0, 40.0]]]
                    })),
                    ..AlertArea::default()
                }],
                ..AlertInfo::default()
            }],
            ..Alert::default()
        }
    }

    fn circle_alert(identifier: &str, longitude: f64, latitude: f64) -> Alert {
        Alert {
            identifier: identifier.to_string(),
            info: vec![AlertInfo {
                area: vec![AlertArea {
                    circle: Some(json!({ "coordinates": [longitude, latitude], "radius": 5 })),
                    ..AlertArea::default()
                }],
                ..AlertInfo::default()
            }],
            ..Alert::default()
        }
    }

    #[test]
    fn matches_polygon_vertex_inside_viewport() {
        let bounds = ViewportBounds {
            north: 41.0,
            south: 39.0,
            east: -98.0,
            west: -101.0,
        };
        assert!(alert_matches(&polygon_alert("a1"), &bounds));
    }

    #[test]
    fn rejects_alert_outside_viewport() {
        let bounds = ViewportBounds {
            north: 10.0,
            south: 0.0,
            east: 10.0,
            west: 0.0,
        };
        assert!(!alert_matches(&polygon_alert("a1"), &bounds));
    }

    #[test]
    fn edge_points_are_inside() {
        let bounds = ViewportBounds {
            north: 41.0,
            south: 40.0,
            east: -99.0,
            west: -100.0,
        };
        assert!(bounds.contains(LatLng::new(41.0, -99.5)));
        assert!(bounds.contains(LatLng::new(40.0, -99.5)));
        assert!(bounds.contains(LatLng::new(40.5, -99.0)));
        assert!(bounds.contains(LatLng::new(40.5, -100.0)));
        assert!(!bounds.contains(LatLng::new(41.000_001, -99.5)));
    }

    #[test]
    fn filter_preserves_order_and_is_idempotent() {
        let alerts = vec![
            circle_alert("a1", -105.0, 39.0),
            circle_alert("a2", 10.0, 10.0),
            circle_alert("a3", -104.0, 38.0),
        ];
        let bounds = ViewportBounds {
            north: 45.0,
            south: 30.0,
            east: -100.0,
            west: -110.0,
        };

        let once = filter_by_viewport(&alerts, &bounds);
        let ids: Vec<&str> = once.iter().map(|a| a.identifier.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a3"]);

        let filtered: Vec<Alert> = once.into_iter().cloned().collect();
        let twice = filter_by_viewport(&filtered, &bounds);
        assert_eq!(twice.len(), filtered.len());
    }

    #[test]
    fn alert_without_geography_never_matches() {
        let alert = Alert::default();
        let everywhere = ViewportBounds {
            north: 90.0,
            south: -90.0,
            east: 180.0,
            west: -180.0,
        };
        assert!(!alert_matches(&alert, &everywhere));
    }

    #[test]
    fn antimeridian_viewport_wraps_longitude() {
        let bounds = ViewportBounds {
            north: 10.0,
            south: -10.0,
            east: -170.0,
            west: 170.0,
        };
        assert!(bounds.crosses_antimeridian());
        assert!(bounds.contains(LatLng::new(0.0, 175.0)));
        assert!(bounds.contains(LatLng::new(0.0, -175.0)));
        assert!(bounds.contains(LatLng::new(0.0, 180.0)));
        // The gap on the far side of the globe is outside.
        assert!(!bounds.contains(LatLng::new(0.0, 0.0)));
        assert!(!bounds.contains(LatLng::new(0.0, -100.0)));
    }

    #[test]
    fn parses_bbox_string() {
        let bounds: ViewportBounds = "-101, 39, -98, 41".parse().unwrap();
        assert!((bounds.west - -101.0).abs() < f64::EPSILON);
        assert!((bounds.south - 39.0).abs() < f64::EPSILON);
        assert!((bounds.east - -98.0).abs() < f64::EPSILON);
        assert!((bounds.north - 41.0).abs() < f64::EPSILON);

        assert!("".parse::<ViewportBounds>().is_err());
        assert!("-101,39,-98".parse::<ViewportBounds>().is_err());
        assert!("-101,39,-98,41,7".parse::<ViewportBounds>().is_err());
        assert!("a,b,c,d".parse::<ViewportBounds>().is_err());
    }

    #[test]
    fn inverted_latitudes_contain_nothing() {
        let bounds = ViewportBounds {
            north: 0.0,
            south: 10.0,
            east: 10.0,
            west: 0.0,
        };
        assert!(!bounds.contains(LatLng::new(5.0, 5.0)));
    }
}
