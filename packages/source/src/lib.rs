#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV loader and field-name adapter for housing records.
//!
//! Published spreadsheet feeds are inconsistent about column naming
//! (`zip` vs `zip_code`, `median_price` vs `median_home_price`, ...).
//! This adapter maps the known variants onto the closed
//! [`LocationRecord`] shape before anything downstream sees the data.
//!
//! Data-quality policy: rows that fail to parse or carry an empty id
//! are skipped with a warning. Coordinate and price validity are NOT
//! enforced here; the analysis pipeline excludes invalid values
//! locally, so a row that was never geocoded still loads and is simply
//! left out of spatial assignment.

use std::fs::File;
use std::io;
use std::path::Path;

use housing_map_housing_models::LocationRecord;
use serde::Deserialize;
use thiserror::Error;

/// Errors from loading a records feed.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The records file could not be opened.
    #[error("Failed to open records file: {0}")]
    Io(#[from] io::Error),

    /// The CSV stream itself was unreadable.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A raw CSV row before normalization. Aliases cover the column-name
/// variants seen across the published feeds.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(alias = "zip", alias = "zip_code", alias = "zipCode")]
    id: String,
    #[serde(default, alias = "lat")]
    latitude: Option<f64>,
    #[serde(default, alias = "lng", alias = "lon", alias = "long")]
    longitude: Option<f64>,
    #[serde(default, alias = "median_price", alias = "medianHomePrice")]
    median_home_price: Option<f64>,
    #[serde(default, alias = "rate_15", alias = "mortgageRate15")]
    mortgage_rate_15: Option<f64>,
    #[serde(default, alias = "rate_30", alias = "mortgageRate30")]
    mortgage_rate_30: Option<f64>,
}

/// Loads and normalizes housing records from a CSV file.
///
/// # Errors
///
/// Returns [`SourceError::Io`] if the file cannot be opened. Individual
/// bad rows are skipped, not errors.
pub fn load_records(path: &Path) -> Result<Vec<LocationRecord>, SourceError> {
    let file = File::open(path)?;
    read_records(file)
}

/// Reads and normalizes housing records from any CSV byte stream.
///
/// # Errors
///
/// Returns [`SourceError::Csv`] only if the stream itself is
/// unreadable; rows that fail to deserialize or lack an id are skipped
/// with a warning.
pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<LocationRecord>, SourceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<RawRow>().enumerate() {
        // Header is line 1, first data row is line 2
        let line = index + 2;
        match row {
            Ok(raw) => {
                if let Some(record) = normalize(raw) {
                    records.push(record);
                } else {
                    log::warn!("Skipping row at line {line}: empty id");
                }
            }
            Err(e) => log::warn!("Skipping unparseable row at line {line}: {e}"),
        }
    }

    log::info!("Loaded {} housing records", records.len());
    Ok(records)
}

/// Maps a raw row onto the normalized record shape. Missing coordinates
/// become NaN so downstream validity checks exclude the row from
/// spatial work without losing it entirely.
fn normalize(raw: RawRow) -> Option<LocationRecord> {
    let id = raw.id.trim();
    if id.is_empty() {
        return None;
    }
    Some(LocationRecord {
        id: id.to_owned(),
        latitude: raw.latitude.unwrap_or(f64::NAN),
        longitude: raw.longitude.unwrap_or(f64::NAN),
        median_home_price: raw.median_home_price,
        mortgage_rate_15: raw.mortgage_rate_15,
        mortgage_rate_30: raw.mortgage_rate_30,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_headers() {
        let csv = "id,latitude,longitude,median_home_price,mortgage_rate_15,mortgage_rate_30\n\
                   78701,30.27,-97.74,450000,5.5,6.0\n\
                   78702,30.26,-97.71,380000,5.5,6.0\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "78701");
        assert_eq!(records[0].median_home_price, Some(450_000.0));
        assert_eq!(records[1].mortgage_rate_30, Some(6.0));
    }

    #[test]
    fn maps_aliased_headers() {
        let csv = "zip,lat,lng,median_price,rate_15,rate_30\n\
                   73301,30.3,-97.7,500000,5.25,5.9\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "73301");
        assert!((records[0].latitude - 30.3).abs() < 1e-9);
        assert_eq!(records[0].median_home_price, Some(500_000.0));
    }

    #[test]
    fn missing_optional_fields_become_none() {
        let csv = "id,latitude,longitude\n78701,30.27,-97.74\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].median_home_price, None);
        assert_eq!(records[0].mortgage_rate_15, None);
    }

    #[test]
    fn ungeocoded_rows_load_with_nan_coordinates() {
        let csv = "id,latitude,longitude,median_home_price\n78701,,,450000\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].latitude.is_nan());
        assert!(records[0].longitude.is_nan());
    }

    #[test]
    fn skips_rows_with_empty_id() {
        let csv = "id,latitude,longitude\n,30.0,-97.0\n78701,30.27,-97.74\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "78701");
    }

    #[test]
    fn skips_unparseable_rows() {
        let csv = "id,latitude,longitude\n78701,not-a-number,-97.74\n78702,30.26,-97.71\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "78702");
    }
}
