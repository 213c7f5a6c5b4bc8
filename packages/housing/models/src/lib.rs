#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Housing record and affordability analysis types.
//!
//! These are the closed, normalized shapes shared across the analysis
//! pipeline. Loaders adapt whatever column names their feeds use into
//! [`LocationRecord`] before anything downstream sees the data; the
//! pipeline never mutates them and returns fresh result structures
//! keyed by id instead of attaching fields onto shared rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single housing data row, keyed by a postal/zip identifier.
///
/// Ids must be unique within one analysis run. Coordinates and prices
/// are taken as-is from the source feed; rows with out-of-range
/// coordinates or missing prices are excluded locally by the pipeline
/// steps that consume them, never rejected up front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    /// Postal/zip identifier (e.g. "78701").
    pub id: String,
    /// Latitude (WGS84 degrees).
    pub latitude: f64,
    /// Longitude (WGS84 degrees).
    pub longitude: f64,
    /// Median home price in dollars, if the source row had one.
    pub median_home_price: Option<f64>,
    /// 15-year fixed mortgage rate (percent).
    pub mortgage_rate_15: Option<f64>,
    /// 30-year fixed mortgage rate (percent).
    pub mortgage_rate_30: Option<f64>,
}

/// A latitude/longitude pair in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Latitude (degrees).
    pub lat: f64,
    /// Longitude (degrees).
    pub lng: f64,
}

/// Three increasing monthly-dollar ceilings derived from income and
/// expenses via fixed debt-to-income fractions.
///
/// Any ceiling may be negative when expenses exceed the corresponding
/// income share; that is a valid state meaning "nothing is affordable".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffordabilityThresholds {
    /// Ceiling at the front-end DTI fraction (0.28).
    pub affordable: f64,
    /// Ceiling at the back-end DTI fraction (0.36).
    pub stretch: f64,
    /// Ceiling at the aggressive DTI fraction (0.43).
    pub aggressive: f64,
}

/// Affordability tier for a monthly payment against a set of thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AffordabilityCategory {
    /// Payment fits within the front-end DTI ceiling.
    Affordable,
    /// Payment fits within the back-end DTI ceiling.
    Stretch,
    /// Payment fits within the aggressive DTI ceiling.
    Aggressive,
    /// Payment exceeds every ceiling.
    OutOfReach,
}

/// Per-hexagon aggregation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexagonAggregate {
    /// Raw H3 cell index of the hexagon.
    pub hexagon_id: u64,
    /// Mean of members' valid positive home prices.
    pub average_median_price: f64,
    /// Ids of every record assigned to this hexagon.
    pub member_record_ids: Vec<String>,
    /// Monthly payment on the average price net of down payment.
    pub monthly_mortgage_payment: f64,
    /// Great-circle distance from the hexagon centroid to the target.
    pub distance_to_target_miles: f64,
    /// Tier of `monthly_mortgage_payment` against the run's thresholds.
    pub affordability_category: AffordabilityCategory,
}

/// The result of one analysis run: the target point and the non-empty
/// hexagons around it, keyed by raw H3 cell index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// The analyzed target location.
    pub target_location: GeoPoint,
    /// Aggregates for every hexagon with at least one valid-priced member.
    pub hexagons: BTreeMap<u64, HexagonAggregate>,
}

/// Caller-supplied configuration for one analysis run.
///
/// There are no baked-in defaults here; the CLI layer supplies the
/// reference defaults (5 mile radius, resolution 6, 3 rings, 30-year
/// term).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Buffer radius around the target, in miles.
    pub radius_miles: f64,
    /// H3 grid resolution (1..=15, larger means smaller cells).
    pub resolution: u8,
    /// Number of adjacency rings to expand around the seed cell.
    pub ring_count: u32,
    /// Down payment in dollars, subtracted from the average price.
    pub down_payment: f64,
    /// Mortgage term in years (15/20/30).
    pub term_years: u32,
    /// Monthly-dollar ceilings for classification.
    pub thresholds: AffordabilityThresholds,
}
