//! Shape parser: raw alert geometry into normalized shapes.
//!
//! Archived IPAWS alerts carry polygons as `GeoJSON`-style objects with
//! (longitude, latitude) coordinate pairs, and circles as a point-like
//! object with a radius in kilometers. Downstream consumers (the map
//! layer) want (latitude, longitude) order and radii in meters, so
//! parsing swaps every pair and converts the radius.
//!
//! The feed has no parsing guarantee: coordinates show up as numbers,
//! numeric strings, or garbage. Both parsers therefore never fail —
//! anything malformed degrades to `None`.

use serde::{Deserialize, Serialize};

/// A geographic point in (latitude, longitude) degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A normalized polygon boundary: an ordered (latitude, longitude)
/// ring with at least 3 points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ring {
    pub points: Vec<LatLng>,
}

/// A normalized circular area: (latitude, longitude) center plus a
/// strictly positive radius in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disc {
    pub center: LatLng,
    /// Radius in meters.
    pub radius_m: f64,
}

/// Parses a raw polygon value into a normalized [`Ring`].
///
/// Accepts either a `GeoJSON` Polygon object (`{"type": "Polygon",
/// "coordinates": [[[lon, lat], ...]]}`) or a bare nested coordinate
/// array. Only the outer ring is used. Pairs where either component is
/// not a finite number (or numeric string) are dropped; if fewer than
/// 3 valid points remain the whole ring is rejected.
#[must_use]
pub fn parse_ring(raw: &serde_json::Value) -> Option<Ring> {
    let rings = coordinates_of(raw).and_then(serde_json::Value::as_array)?;
    let outer = rings.first()?.as_array()?;

    let points: Vec<LatLng> = outer.iter().filter_map(parse_lon_lat_pair).collect();

    if points.len() < 3 {
        if !outer.is_empty() {
            log::debug!(
                "discarding polygon ring: {} valid of {} raw points",
                points.len(),
                outer.len()
            );
        }
        return None;
    }

    Some(Ring { points })
}

/// Parses a raw circle value into a normalized [`Disc`].
///
/// Expects a center in (longitude, latitude) order under
/// `coordinates` and a `radius` in kilometers; the radius is converted
/// to meters. Rejects a non-finite center or a radius that is not
/// strictly positive.
#[must_use]
pub fn parse_disc(raw: &serde_json::Value) -> Option<Disc> {
    let center = coordinates_of(raw)
        .and_then(serde_json::Value::as_array)
        .and_then(|pair| parse_lon_lat_pair_slice(pair))?;

    let radius_km = raw.get("radius").and_then(finite_number)?;
    if radius_km <= 0.0 {
        log::debug!("discarding circle: non-positive radius {radius_km} km");
        return None;
    }

    Some(Disc {
        center,
        radius_m: radius_km * 1000.0,
    })
}

/// Returns the `coordinates` member of a geometry object, or the value
/// itself when the feed ships a bare coordinate array.
fn coordinates_of(raw: &serde_json::Value) -> Option<&serde_json::Value> {
    match raw {
        serde_json::Value::Object(obj) => obj.get("coordinates"),
        serde_json::Value::Array(_) => Some(raw),
        _ => None,
    }
}

/// Parses one `[lon, lat]` pair, swapping to [`LatLng`] order.
fn parse_lon_lat_pair(value: &serde_json::Value) -> Option<LatLng> {
    parse_lon_lat_pair_slice(value.as_array()?)
}

fn parse_lon_lat_pair_slice(pair: &[serde_json::Value]) -> Option<LatLng> {
    let longitude = pair.first().and_then(finite_number)?;
    let latitude = pair.get(1).and_then(finite_number)?;
    Some(LatLng {
        latitude,
        longitude,
    })
}

/// Extracts a finite `f64` from a JSON number or numeric string.
fn finite_number(value: &serde_json::Value) -> Option<f64> {
    let n = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_geojson_polygon_with_swapped_order() {
        let raw = json!({
            "type": "Polygon",
            "coordinates": [[[-100.0, 40.0], [-100.0, 41.0], [-99.0, 40.0]]]
        });
        let ring = parse_ring(&raw).unwrap();
        assert_eq!(
            ring.points,
            vec![
                LatLng::new(40.0, -100.0),
                LatLng::new(41.0, -100.0),
                LatLng::new(40.0, -99.0),
            ]
        );
    }

    #[test]
    fn parses_bare_coordinate_array() {
        let raw = json!([[[-100.0, 40.0], [-100.0, 41.0], [-99.0, 40.0], [-100.0, 40.0]]]);
        let ring = parse_ring(&raw).unwrap();
        assert_eq!(ring.points.len(), 4);
    }

    #[test]
    fn accepts_numeric_string_coordinates() {
        let raw = json!({
            "coordinates": [[["-100.0", "40.0"], ["-100.0", "41.0"], ["-99.0", "40.0"]]]
        });
        let ring = parse_ring(&raw).unwrap();
        assert_eq!(ring.points[0], LatLng::new(40.0, -100.0));
    }

    #[test]
    fn drops_invalid_pairs_and_keeps_the_rest() {
        let raw = json!({
            "coordinates": [[
                [-100.0, 40.0],
                ["garbage", 41.0],
                [-100.0, 41.0],
                [-99.0, null],
                [-99.0, 40.0]
            ]]
        });
        let ring = parse_ring(&raw).unwrap();
        assert_eq!(ring.points.len(), 3);
    }

    #[test]
    fn rejects_ring_with_fewer_than_three_valid_points() {
        let raw = json!({ "coordinates": [[[-100.0, 40.0], [-100.0, 41.0]]] });
        assert!(parse_ring(&raw).is_none());

        let all_invalid = json!({ "coordinates": [[["a", "b"], ["c", "d"], ["e", "f"]]] });
        assert!(parse_ring(&all_invalid).is_none());
    }

    #[test]
    fn rejects_non_polygon_values() {
        assert!(parse_ring(&json!(null)).is_none());
        assert!(parse_ring(&json!("POLYGON((0 0))")).is_none());
        assert!(parse_ring(&json!({ "type": "Polygon" })).is_none());
        assert!(parse_ring(&json!({ "coordinates": [] })).is_none());
    }

    #[test]
    fn parses_circle_and_converts_radius_to_meters() {
        let raw = json!({
            "type": "Circle",
            "coordinates": [-105.0, 39.0],
            "radius": 5
        });
        let disc = parse_disc(&raw).unwrap();
        assert_eq!(disc.center, LatLng::new(39.0, -105.0));
        assert!((disc.radius_m - 5000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_circle_with_non_positive_radius() {
        let zero = json!({ "coordinates": [-105.0, 39.0], "radius": 0 });
        assert!(parse_disc(&zero).is_none());

        let negative = json!({ "coordinates": [-105.0, 39.0], "radius": -2.5 });
        assert!(parse_disc(&negative).is_none());

        let missing = json!({ "coordinates": [-105.0, 39.0] });
        assert!(parse_disc(&missing).is_none());
    }

    #[test]
    fn rejects_circle_with_invalid_center() {
        let raw = json!({ "coordinates": ["west", "north"], "radius": 5 });
        assert!(parse_disc(&raw).is_none());

        let short = json!({ "coordinates": [-105.0], "radius": 5 });
        assert!(parse_disc(&short).is_none());
    }

    #[test]
    fn rejects_non_finite_string_components() {
        let raw = json!({
            "coordinates": [[["inf", 40.0], ["NaN", 41.0], [-99.0, 40.0]]]
        });
        assert!(parse_ring(&raw).is_none());
    }
}
