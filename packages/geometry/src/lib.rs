#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geospatial core for the IPAWS alert map.
//!
//! Turns the free-form geometry carried by archived alerts into
//! renderable shapes and answers the three questions the map layer
//! asks:
//!
//! 1. [`boundary::extract_boundaries`] — all rings and discs of one
//!    alert, for rendering and zoom-to-fit.
//! 2. [`marker::derive_markers`] — one representative point per
//!    geographic sub-area, for map-pin placement.
//! 3. [`viewport::filter_by_viewport`] — which alerts have at least
//!    one shape inside a rectangular viewport.
//!
//! Everything here is a pure, synchronous function over immutable
//! input: no I/O, no shared state, freely parallelizable. Malformed
//! geometry never produces an error — it degrades to "no shape" so
//! one garbled area cannot take down the rest of a batch.

pub mod boundary;
pub mod marker;
pub mod shape;
pub mod viewport;

pub use boundary::{BoundarySet, extract_boundaries};
pub use marker::{Marker, derive_markers};
pub use shape::{Disc, LatLng, Ring, parse_disc, parse_ring};
pub use viewport::{ParseBoundsError, ViewportBounds, filter_by_viewport};
