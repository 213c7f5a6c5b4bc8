//! Per-hexagon affordability aggregation.
//!
//! Folds assigned records into one [`HexagonAggregate`] per hexagon:
//! the mean of members' valid home prices, the mortgage payment on that
//! mean net of the down payment, the distance from the hexagon centroid
//! to the target, and the affordability tier of the payment.

use std::collections::BTreeMap;

use h3o::CellIndex;
use housing_map_geo::distance_miles;
use housing_map_hexgrid::centroid_of;
use housing_map_housing_models::{
    AffordabilityThresholds, GeoPoint, HexagonAggregate, LocationRecord,
};
use housing_map_mortgage::{classify, monthly_payment};

/// Aggregates assigned records into per-hexagon affordability results.
///
/// Only members with a valid positive finite price contribute to the
/// average; missing or NaN prices are skipped, never treated as zero.
/// Hexagons whose members all lack a usable price are omitted from the
/// result entirely. The loan amount `average - down_payment` may go
/// negative when the down payment exceeds the average price; the
/// resulting payment is negative and classifies as affordable.
///
/// `member_record_ids` lists every assigned member (priced or not),
/// sorted for deterministic output.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn aggregate(
    records: &[LocationRecord],
    assignment: &BTreeMap<String, CellIndex>,
    target: GeoPoint,
    interest_rate_percent: f64,
    down_payment: f64,
    term_years: u32,
    thresholds: &AffordabilityThresholds,
) -> BTreeMap<u64, HexagonAggregate> {
    // Group members per hexagon, keeping record input order
    let mut members: BTreeMap<u64, (CellIndex, Vec<&LocationRecord>)> = BTreeMap::new();
    for record in records {
        if let Some(&cell) = assignment.get(&record.id) {
            members
                .entry(u64::from(cell))
                .or_insert_with(|| (cell, Vec::new()))
                .1
                .push(record);
        }
    }

    let mut aggregates = BTreeMap::new();

    for (hexagon_id, (cell, group)) in members {
        let prices: Vec<f64> = group
            .iter()
            .filter_map(|r| r.median_home_price)
            .filter(|p| p.is_finite() && *p > 0.0)
            .collect();

        if prices.is_empty() {
            log::debug!("Omitting hexagon {cell}: no members with a usable price");
            continue;
        }

        let average_median_price = prices.iter().sum::<f64>() / prices.len() as f64;
        let loan_amount = average_median_price - down_payment;
        let payment = monthly_payment(loan_amount, interest_rate_percent, term_years);

        let centroid = centroid_of(cell);
        let distance = distance_miles(centroid.lat, centroid.lng, target.lat, target.lng);

        let mut member_record_ids: Vec<String> = group.iter().map(|r| r.id.clone()).collect();
        member_record_ids.sort_unstable();

        aggregates.insert(
            hexagon_id,
            HexagonAggregate {
                hexagon_id,
                average_median_price,
                member_record_ids,
                monthly_mortgage_payment: payment,
                distance_to_target_miles: distance,
                affordability_category: classify(payment, thresholds),
            },
        );
    }

    aggregates
}
