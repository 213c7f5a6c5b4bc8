#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Hexagonal grid indexing over H3 cells.
//!
//! Thin wrapper around `h3o` exposing the three operations the analysis
//! pipeline needs: point-to-cell lookup, k-ring disk expansion around a
//! seed cell, and the inverse cell-to-centroid mapping. Cell handles are
//! `h3o::CellIndex` throughout; result maps store the raw `u64` form so
//! model types stay free of grid dependencies.

use h3o::{CellIndex, LatLng, Resolution};
use housing_map_geo::is_valid_coordinate;
use housing_map_housing_models::GeoPoint;
use thiserror::Error;

/// Errors from grid parameter validation and cell handling.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GridError {
    /// Resolution outside the supported `1..=15` range.
    #[error("Invalid grid resolution: {0} (expected 1..=15)")]
    InvalidResolution(u8),

    /// Coordinates are non-finite or out of the WGS84 range.
    #[error("Invalid coordinate for grid lookup: lat={lat}, lng={lng}")]
    InvalidCoordinate {
        /// The offending latitude.
        lat: f64,
        /// The offending longitude.
        lng: f64,
    },

    /// A raw `u64` handle that is not a valid H3 cell index.
    #[error("Invalid H3 cell handle: {0:#x}")]
    InvalidCell(u64),
}

/// Parses a resolution into an [`h3o::Resolution`].
///
/// Resolution 0 is rejected even though H3 defines it: a single-digit
/// handful of continent-sized cells is never a meaningful aggregation
/// bucket here, and callers passing 0 have a configuration bug.
///
/// # Errors
///
/// Returns [`GridError::InvalidResolution`] for 0 or anything above 15.
pub fn parse_resolution(resolution: u8) -> Result<Resolution, GridError> {
    if resolution == 0 {
        return Err(GridError::InvalidResolution(resolution));
    }
    Resolution::try_from(resolution).map_err(|_| GridError::InvalidResolution(resolution))
}

/// Maps a coordinate to its enclosing grid cell at the given resolution.
///
/// Deterministic: the same input always produces the same cell. Higher
/// resolutions produce smaller cells (H3 guarantees the hierarchy).
///
/// # Errors
///
/// Returns [`GridError::InvalidResolution`] for an out-of-range
/// resolution and [`GridError::InvalidCoordinate`] for coordinates that
/// fail validation.
pub fn cell_for_point(lat: f64, lng: f64, resolution: u8) -> Result<CellIndex, GridError> {
    let res = parse_resolution(resolution)?;
    if !is_valid_coordinate(lat, lng) {
        return Err(GridError::InvalidCoordinate { lat, lng });
    }
    let coord = LatLng::new(lat, lng).map_err(|_| GridError::InvalidCoordinate { lat, lng })?;
    Ok(coord.to_cell(res))
}

/// Expands a cell into the contiguous disk of cells within `ring_count`
/// rings of adjacency, origin included.
///
/// `ring_count = 0` yields exactly the origin cell. The returned set
/// contains no duplicates.
#[must_use]
pub fn disk_around_cell(cell: CellIndex, ring_count: u32) -> Vec<CellIndex> {
    let disk: Vec<CellIndex> = cell.grid_disk(ring_count);
    log::debug!(
        "Expanded cell {cell} at resolution {} into {} cells ({ring_count} rings)",
        cell.resolution(),
        disk.len()
    );
    disk
}

/// Geometric center of a cell, as a lat/lng pair in degrees.
#[must_use]
pub fn centroid_of(cell: CellIndex) -> GeoPoint {
    let center = LatLng::from(cell);
    GeoPoint {
        lat: center.lat(),
        lng: center.lng(),
    }
}

/// Re-hydrates a raw `u64` handle back into a cell index.
///
/// # Errors
///
/// Returns [`GridError::InvalidCell`] if the bits are not a valid H3
/// cell index.
pub fn cell_from_raw(raw: u64) -> Result<CellIndex, GridError> {
    CellIndex::try_from(raw).map_err(|_| GridError::InvalidCell(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUSTIN: (f64, f64) = (30.2672, -97.7431);

    #[test]
    fn lookup_is_deterministic() {
        let a = cell_for_point(AUSTIN.0, AUSTIN.1, 6).unwrap();
        let b = cell_for_point(AUSTIN.0, AUSTIN.1, 6).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_resolutions_give_different_cells() {
        let coarse = cell_for_point(AUSTIN.0, AUSTIN.1, 4).unwrap();
        let fine = cell_for_point(AUSTIN.0, AUSTIN.1, 9).unwrap();
        assert_ne!(coarse, fine);
        assert!(coarse.resolution() < fine.resolution());
    }

    #[test]
    fn zero_ring_disk_is_just_the_origin() {
        let cell = cell_for_point(AUSTIN.0, AUSTIN.1, 6).unwrap();
        assert_eq!(disk_around_cell(cell, 0), vec![cell]);
    }

    #[test]
    fn disk_size_grows_with_ring_count() {
        let cell = cell_for_point(AUSTIN.0, AUSTIN.1, 6).unwrap();
        let mut previous = 0;
        for k in 0..4 {
            let size = disk_around_cell(cell, k).len();
            assert!(size >= previous, "disk shrank at k={k}: {size} < {previous}");
            previous = size;
        }
        // Non-pentagon seeds expand to exactly 1 + 6 + 12 + ... cells
        assert_eq!(disk_around_cell(cell, 1).len(), 7);
        assert_eq!(disk_around_cell(cell, 2).len(), 19);
    }

    #[test]
    fn disk_contains_no_duplicates() {
        let cell = cell_for_point(AUSTIN.0, AUSTIN.1, 6).unwrap();
        let disk = disk_around_cell(cell, 3);
        let mut deduped = disk.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(disk.len(), deduped.len());
    }

    #[test]
    fn centroid_is_inside_the_cell_neighborhood() {
        let cell = cell_for_point(AUSTIN.0, AUSTIN.1, 6).unwrap();
        let centroid = centroid_of(cell);
        let d = housing_map_geo::distance_miles(AUSTIN.0, AUSTIN.1, centroid.lat, centroid.lng);
        // Resolution 6 edge length is ~2 miles; the centroid of the
        // containing cell cannot be farther than one edge away.
        assert!(d < 2.5, "centroid {d} miles from the point it contains");
    }

    #[test]
    fn rejects_invalid_resolution() {
        assert_eq!(
            cell_for_point(AUSTIN.0, AUSTIN.1, 0),
            Err(GridError::InvalidResolution(0))
        );
        assert_eq!(
            cell_for_point(AUSTIN.0, AUSTIN.1, 16),
            Err(GridError::InvalidResolution(16))
        );
    }

    #[test]
    fn rejects_invalid_coordinate() {
        assert!(matches!(
            cell_for_point(999.0, -97.0, 6),
            Err(GridError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn raw_handle_round_trips() {
        let cell = cell_for_point(AUSTIN.0, AUSTIN.1, 6).unwrap();
        let raw = u64::from(cell);
        assert_eq!(cell_from_raw(raw), Ok(cell));
        assert_eq!(cell_from_raw(0), Err(GridError::InvalidCell(0)));
    }
}
