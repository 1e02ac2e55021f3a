#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CAP/IPAWS alert record types.
//!
//! These types mirror the JSON shape of the `OpenFEMA` IPAWS Archived
//! Alerts feed. The feed is third-party data with no schema guarantee,
//! so every descriptive field is optional, enumerations fall back to
//! `Unknown` on unrecognized values, and geometry is carried as raw
//! JSON — the geometry crate owns all numeric and structural
//! validation of polygons and circles.
//!
//! All types are read-only value data: an [`Alert`] is never mutated
//! after deserialization, only walked.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One archived IPAWS alert record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Originating COG (Collaborative Operating Group) identifier.
    #[serde(default)]
    pub cog_id: String,
    /// CAP alert identifier, unique per alert.
    #[serde(default)]
    pub identifier: String,
    /// Issuance timestamp as sent by the feed (raw string; the feed
    /// does not guarantee a parseable format).
    #[serde(default)]
    pub sent: String,
    /// CAP message type (e.g. "Alert", "Update", "Cancel").
    #[serde(default)]
    pub msg_type: String,
    /// Originating source, when present.
    pub source: Option<String>,
    /// Descriptive info blocks. An alert with none carries no
    /// renderable geography.
    #[serde(default)]
    pub info: Vec<AlertInfo>,
}

/// One CAP info block: descriptive fields plus geographic areas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertInfo {
    pub headline: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
    pub severity: Option<Severity>,
    pub urgency: Option<Urgency>,
    pub certainty: Option<Certainty>,
    /// Effective timestamp (raw feed string).
    pub effective: Option<String>,
    /// Expiry timestamp (raw feed string).
    pub expires: Option<String>,
    #[serde(default)]
    pub event_code: Vec<EventCode>,
    #[serde(default)]
    pub area: Vec<AlertArea>,
}

/// One geographic sub-area of an info block.
///
/// Zero, one, or both geometry kinds may be present. Geometry is kept
/// as raw [`serde_json::Value`] because archived alerts carry polygons
/// and circles in several malformed variants; parsing and validation
/// happen in `ipaws_map_geometry`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertArea {
    /// Human-readable description of the area.
    pub area_desc: Option<String>,
    /// Raw polygon geometry, usually a `GeoJSON` Polygon object with
    /// (longitude, latitude) coordinate pairs.
    pub polygon: Option<serde_json::Value>,
    /// Raw circle geometry: a point-like object with a center in
    /// (longitude, latitude) order and a radius in kilometers.
    pub circle: Option<serde_json::Value>,
    #[serde(default)]
    pub geocode: Vec<Geocode>,
}

/// CAP event code entry (`valueName`/`value` pair).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCode {
    pub value_name: Option<String>,
    pub value: Option<String>,
}

/// CAP geocode entry (`valueName`/`value` pair, e.g. SAME/UGC codes).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geocode {
    pub value_name: Option<String>,
    pub value: Option<String>,
}

/// CAP severity enumeration. Unrecognized feed values deserialize to
/// [`Severity::Unknown`] rather than failing the record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(from = "String")]
pub enum Severity {
    Extreme,
    Severe,
    Moderate,
    Minor,
    Unknown,
}

impl From<String> for Severity {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(Self::Unknown)
    }
}

/// CAP urgency enumeration. Unrecognized feed values deserialize to
/// [`Urgency::Unknown`] rather than failing the record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(from = "String")]
pub enum Urgency {
    Immediate,
    Expected,
    Future,
    Past,
    Unknown,
}

impl From<String> for Urgency {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(Self::Unknown)
    }
}

/// CAP certainty enumeration. Unrecognized feed values deserialize to
/// [`Certainty::Unknown`] rather than failing the record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(from = "String")]
pub enum Certainty {
    Observed,
    Likely,
    Possible,
    Unlikely,
    Unknown,
}

impl From<String> for Certainty {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(Self::Unknown)
    }
}

impl Alert {
    /// Iterates every [`AlertArea`] across every info block, in their
    /// given order.
    pub fn areas(&self) -> impl Iterator<Item = &AlertArea> {
        self.info.iter().flat_map(|info| info.area.iter())
    }
}
