#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Alert retrieval adapter for the `OpenFEMA` IPAWS archive.
//!
//! Fetches archived alert records for a date window from the
//! `OpenFEMA` OData endpoint ([`ipaws::fetch_alerts`]), with automatic
//! retry for transient HTTP failures ([`retry::send_json`]).
//!
//! The adapter owns all network concerns; the geometry core never
//! performs I/O. Callers that want the "total retrieval failure means
//! an empty map" behavior map the error to an empty list themselves —
//! the adapter always reports what actually happened.

pub mod ipaws;
pub mod retry;

use std::time::Duration;

use chrono::NaiveDate;
use ipaws_map_geometry::ViewportBounds;

/// Errors that can occur while retrieving alerts.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The endpoint returned something other than the expected
    /// response shape, or kept failing with a retryable status.
    #[error("Unexpected response: {message}")]
    UnexpectedResponse {
        /// Description of what went wrong.
        message: String,
    },
}

/// Parameters for one archive fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Start of the date window (inclusive, UTC calendar date).
    pub start: NaiveDate,
    /// End of the date window (inclusive, UTC calendar date).
    pub end: NaiveDate,
    /// Optional viewport to narrow the results to before returning.
    pub bounds: Option<ViewportBounds>,
    /// Maximum number of records to request.
    pub limit: u64,
}

impl FetchOptions {
    /// Default `$top` value, matching what the archive endpoint caps a
    /// single request at.
    pub const DEFAULT_LIMIT: u64 = 1000;

    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            bounds: None,
            limit: Self::DEFAULT_LIMIT,
        }
    }

    #[must_use]
    pub const fn with_bounds(mut self, bounds: ViewportBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// Builds the HTTP client used for all archive and geocoding requests.
///
/// # Errors
///
/// Returns [`SourceError::Http`] if the client cannot be constructed.
pub fn build_http_client() -> Result<reqwest::Client, SourceError> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("ipaws-map/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(60))
        .build()?)
}
