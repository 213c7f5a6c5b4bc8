#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Buffer, hex-grid assignment, and affordability aggregation pipeline.
//!
//! The public entry point is [`orchestrator::run_analysis`]: given a
//! record set, a target record, and a configuration, it builds a buffer
//! around the target, expands the enclosing H3 cell into a k-ring disk,
//! assigns every record to its nearest hexagon centroid, and aggregates
//! per-hexagon affordability. The whole pipeline is synchronous, pure,
//! and stateless; identical inputs always produce identical results.
//!
//! Fatal configuration errors (bad target coordinates, bad grid
//! parameters) surface as [`AnalysisError`]. Per-record data-quality
//! problems (missing geocoding, missing prices) are absorbed locally
//! and never abort a run.

pub mod aggregate;
pub mod assign;
pub mod cache;
pub mod orchestrator;

pub use aggregate::aggregate;
pub use assign::assign_nearest;
pub use cache::CachedAnalysis;
pub use orchestrator::run_analysis;

use thiserror::Error;

/// Errors that abort an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Target coordinates or buffer parameters were invalid.
    #[error(transparent)]
    Geo(#[from] housing_map_geo::GeoError),

    /// Grid resolution or cell handling failed.
    #[error(transparent)]
    Grid(#[from] housing_map_hexgrid::GridError),

    /// The target record has no rate for the requested term.
    #[error("Target record {id} has no {term_years}-year mortgage rate")]
    MissingRate {
        /// Id of the target record.
        id: String,
        /// The requested mortgage term.
        term_years: u32,
    },

    /// Mortgage term of zero years.
    #[error("Mortgage term must be at least 1 year")]
    InvalidTerm,

    /// Cache key serialization failed.
    #[error("Failed to serialize cache key: {0}")]
    CacheKey(#[from] serde_json::Error),
}
