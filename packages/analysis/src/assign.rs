//! Nearest-hexagon assignment for location records.
//!
//! Brute-force nearest-neighbor over hexagon centroids. Both sets are
//! small (at most a few hundred records against a few dozen hexagons
//! from single-digit ring counts), so the O(records x hexagons) scan is
//! the whole algorithm; a spatial index would cost more to build than
//! it saves.

use std::collections::BTreeMap;

use h3o::CellIndex;
use housing_map_geo::{distance_miles, is_valid_coordinate};
use housing_map_hexgrid::centroid_of;
use housing_map_housing_models::{GeoPoint, LocationRecord};

/// Assigns each record to the hexagon whose centroid is nearest.
///
/// Ties keep the first-encountered hexagon in `hexagons` input order,
/// so the assignment is deterministic and stable. Records with invalid
/// coordinates are omitted from the returned map; imperfect geocoding
/// in the source feed must never abort the run.
#[must_use]
pub fn assign_nearest(
    records: &[LocationRecord],
    hexagons: &[CellIndex],
) -> BTreeMap<String, CellIndex> {
    let centroids: Vec<(CellIndex, GeoPoint)> = hexagons
        .iter()
        .map(|&cell| (cell, centroid_of(cell)))
        .collect();

    let mut assignment = BTreeMap::new();

    for record in records {
        if !is_valid_coordinate(record.latitude, record.longitude) {
            log::debug!(
                "Skipping record {} with invalid coordinates ({}, {})",
                record.id,
                record.latitude,
                record.longitude
            );
            continue;
        }

        let mut best: Option<(CellIndex, f64)> = None;
        for &(cell, centroid) in &centroids {
            let d = distance_miles(record.latitude, record.longitude, centroid.lat, centroid.lng);
            match best {
                None => best = Some((cell, d)),
                Some((_, best_d)) if d < best_d => best = Some((cell, d)),
                _ => {}
            }
        }

        if let Some((cell, _)) = best {
            assignment.insert(record.id.clone(), cell);
        }
    }

    assignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use housing_map_hexgrid::{cell_for_point, disk_around_cell};

    fn record(id: &str, lat: f64, lng: f64) -> LocationRecord {
        LocationRecord {
            id: id.to_owned(),
            latitude: lat,
            longitude: lng,
            median_home_price: Some(250_000.0),
            mortgage_rate_15: Some(5.5),
            mortgage_rate_30: Some(6.0),
        }
    }

    #[test]
    fn assigns_every_valid_record() {
        let seed = cell_for_point(30.0, -97.0, 6).unwrap();
        let hexagons = disk_around_cell(seed, 2);
        let records = vec![
            record("a", 30.0, -97.0),
            record("b", 30.01, -97.01),
            record("c", 29.99, -96.99),
        ];

        let assignment = assign_nearest(&records, &hexagons);
        assert_eq!(assignment.len(), 3);
    }

    #[test]
    fn no_unassigned_centroid_is_strictly_closer() {
        let seed = cell_for_point(30.0, -97.0, 6).unwrap();
        let hexagons = disk_around_cell(seed, 2);
        let records: Vec<LocationRecord> = (0..10)
            .map(|i| {
                let offset = f64::from(i) * 0.008;
                record(&format!("r{i}"), 30.0 + offset, -97.0 - offset)
            })
            .collect();

        let assignment = assign_nearest(&records, &hexagons);

        for r in &records {
            let assigned = assignment[&r.id];
            let assigned_centroid = centroid_of(assigned);
            let assigned_d = distance_miles(
                r.latitude,
                r.longitude,
                assigned_centroid.lat,
                assigned_centroid.lng,
            );
            for &other in &hexagons {
                let c = centroid_of(other);
                let d = distance_miles(r.latitude, r.longitude, c.lat, c.lng);
                assert!(
                    d >= assigned_d,
                    "record {} assigned to a centroid {assigned_d} miles away \
                     while {other} is {d} miles away",
                    r.id
                );
            }
        }
    }

    #[test]
    fn skips_records_with_invalid_coordinates() {
        let seed = cell_for_point(30.0, -97.0, 6).unwrap();
        let hexagons = disk_around_cell(seed, 1);
        let records = vec![
            record("good", 30.0, -97.0),
            record("bad-lat", 999.0, -97.0),
            record("bad-lng", 30.0, -200.0),
            record("nan", f64::NAN, -97.0),
        ];

        let assignment = assign_nearest(&records, &hexagons);
        assert_eq!(assignment.len(), 1);
        assert!(assignment.contains_key("good"));
    }

    #[test]
    fn empty_hexagon_list_assigns_nothing() {
        let records = vec![record("a", 30.0, -97.0)];
        let assignment = assign_nearest(&records, &[]);
        assert!(assignment.is_empty());
    }

    #[test]
    fn hexagon_input_order_does_not_change_a_clear_winner() {
        let seed = cell_for_point(30.0, -97.0, 6).unwrap();
        let mut hexagons = disk_around_cell(seed, 1);
        let records = vec![record("a", 30.0, -97.0)];

        let forward = assign_nearest(&records, &hexagons);
        hexagons.reverse();
        let reversed = assign_nearest(&records, &hexagons);
        assert_eq!(forward["a"], reversed["a"]);
    }
}
