//! Public entry point for one affordability analysis run.

use housing_map_geo::{BufferZone, GeoError, is_valid_coordinate};
use housing_map_hexgrid::{cell_for_point, disk_around_cell};
use housing_map_housing_models::{AnalysisConfig, AnalysisResult, GeoPoint, LocationRecord};

use crate::{AnalysisError, aggregate, assign_nearest};

/// Runs the full pipeline for one target location.
///
/// Steps: validate the target's coordinates, build a geodesic buffer of
/// `config.radius_miles` around it, derive the seed cell from the
/// buffer centroid at `config.resolution`, expand to a k-ring disk of
/// `config.ring_count` rings, pick the target's mortgage rate for the
/// configured term, assign every record to its nearest hexagon, and
/// aggregate per-hexagon affordability.
///
/// Stateless and deterministic: identical inputs produce an identical
/// [`AnalysisResult`]. The input slice is never mutated; all derived
/// data lives in the returned structure. Wrap in
/// [`crate::CachedAnalysis`] when repeated identical calls are expected.
///
/// # Errors
///
/// Fails fast with [`AnalysisError::Geo`] when the target coordinates
/// or radius are invalid, [`AnalysisError::Grid`] for a bad resolution,
/// [`AnalysisError::InvalidTerm`] for a zero-year term, and
/// [`AnalysisError::MissingRate`] when the target record carries no
/// rate for the requested term. Per-record data problems never error.
pub fn run_analysis(
    records: &[LocationRecord],
    target: &LocationRecord,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    if !is_valid_coordinate(target.latitude, target.longitude) {
        return Err(GeoError::InvalidLocation {
            lat: target.latitude,
            lng: target.longitude,
        }
        .into());
    }
    if config.term_years == 0 {
        return Err(AnalysisError::InvalidTerm);
    }
    let interest_rate = rate_for_term(target, config.term_years).ok_or_else(|| {
        AnalysisError::MissingRate {
            id: target.id.clone(),
            term_years: config.term_years,
        }
    })?;

    let center = GeoPoint {
        lat: target.latitude,
        lng: target.longitude,
    };

    let buffer = BufferZone::build(center, config.radius_miles)?;
    let seed_point = buffer.centroid();
    let seed = cell_for_point(seed_point.lat, seed_point.lng, config.resolution)?;
    let hexagons = disk_around_cell(seed, config.ring_count);

    let assignment = assign_nearest(records, &hexagons);
    log::info!(
        "Assigned {} of {} records to {} hexagons around {}",
        assignment.len(),
        records.len(),
        hexagons.len(),
        target.id
    );

    let hexagons = aggregate(
        records,
        &assignment,
        center,
        interest_rate,
        config.down_payment,
        config.term_years,
        &config.thresholds,
    );

    Ok(AnalysisResult {
        target_location: center,
        hexagons,
    })
}

/// Picks the target's rate field for the requested term: 15 years and
/// under uses the 15-year rate, everything longer the 30-year rate.
fn rate_for_term(record: &LocationRecord, term_years: u32) -> Option<f64> {
    if term_years <= 15 {
        record.mortgage_rate_15
    } else {
        record.mortgage_rate_30
    }
}
