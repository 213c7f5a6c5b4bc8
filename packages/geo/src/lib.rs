#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Great-circle distance math and geodesic buffer zones.
//!
//! Pure coordinate utilities shared by the whole pipeline: haversine
//! distance in miles, coordinate validity checks, and circular buffer
//! polygons around a point. Everything here is deterministic and
//! allocation-light; the only heap use is the buffer ring itself.

pub mod buffer;

pub use buffer::BufferZone;

use thiserror::Error;

/// Earth radius in miles, matching the reference great-circle math.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Errors from coordinate and buffer operations.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoError {
    /// Coordinates are non-finite or out of the WGS84 range.
    #[error("Invalid location: lat={lat}, lng={lng}")]
    InvalidLocation {
        /// The offending latitude.
        lat: f64,
        /// The offending longitude.
        lng: f64,
    },

    /// Buffer radius was zero or negative.
    #[error("Buffer radius must be positive, got {0}")]
    InvalidRadius(f64),
}

/// Great-circle (haversine) distance between two points, in miles.
///
/// Symmetric in its arguments; identical points yield 0.
#[inline]
#[must_use]
pub fn distance_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Returns true iff both values are finite and within the WGS84 range
/// (`-90..=90` latitude, `-180..=180` longitude).
///
/// Rows failing this check are excluded from spatial operations rather
/// than aborting the pipeline; source feeds routinely carry rows that
/// were never geocoded.
#[inline]
#[must_use]
pub fn is_valid_coordinate(lat: f64, lng: f64) -> bool {
    lat.is_finite()
        && lng.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lng)
}
