#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Postal-code geocoding for recentering the alert map.
//!
//! A single provider: the Nominatim / `OpenStreetMap` search endpoint.
//! Used only to move the view to a user-entered ZIP code — geocoding
//! plays no part in the alert geometry transformations.
//!
//! Nominatim has strict rate limits (1 request per second for the
//! public instance); the caller is responsible for pacing.

pub mod nominatim;

use thiserror::Error;

/// A resolved geographic position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
}

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,
}
