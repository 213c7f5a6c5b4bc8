//! Circular geodesic buffer zones.
//!
//! A buffer zone is a disk polygon of fixed radius around a generator
//! point, used to bound the search area for spatial aggregation. The
//! ring is built on the sphere via the destination-point formula, so a
//! 5 mile buffer is 5 miles in every compass direction regardless of
//! latitude. Only the centroid is consumed downstream; the full ring is
//! kept for export and debugging.

use geo::{Centroid, LineString, Polygon};
use housing_map_housing_models::GeoPoint;

use crate::{EARTH_RADIUS_MILES, GeoError, is_valid_coordinate};

/// Number of segments used to approximate the circle.
const BUFFER_SEGMENTS: u32 = 64;

/// A circular geodesic disk around a generator point.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferZone {
    center: GeoPoint,
    radius_miles: f64,
    polygon: Polygon<f64>,
}

impl BufferZone {
    /// Builds a buffer of `radius_miles` around `center`.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidLocation`] if the center fails
    /// coordinate validation, and [`GeoError::InvalidRadius`] if the
    /// radius is zero or negative. Callers must not proceed with a
    /// degenerate polygon.
    pub fn build(center: GeoPoint, radius_miles: f64) -> Result<Self, GeoError> {
        if !is_valid_coordinate(center.lat, center.lng) {
            return Err(GeoError::InvalidLocation {
                lat: center.lat,
                lng: center.lng,
            });
        }
        if !radius_miles.is_finite() || radius_miles <= 0.0 {
            return Err(GeoError::InvalidRadius(radius_miles));
        }

        let mut ring: Vec<(f64, f64)> = Vec::with_capacity(BUFFER_SEGMENTS as usize + 1);
        for i in 0..BUFFER_SEGMENTS {
            let bearing_deg = 360.0 * f64::from(i) / f64::from(BUFFER_SEGMENTS);
            let (lat, lng) = destination_point(center.lat, center.lng, bearing_deg, radius_miles);
            // geo rings are (x, y) = (lng, lat)
            ring.push((lng, lat));
        }
        ring.push(ring[0]);

        log::debug!(
            "Built {radius_miles} mile buffer around ({}, {}) with {BUFFER_SEGMENTS} segments",
            center.lat,
            center.lng
        );

        Ok(Self {
            center,
            radius_miles,
            polygon: Polygon::new(LineString::from(ring), vec![]),
        })
    }

    /// Geometric centroid of the buffer polygon.
    ///
    /// Circular buffers are centered on their generator point, so this
    /// equals the input center up to the ring approximation. Falls back
    /// to the generator center if the ring is somehow degenerate.
    #[must_use]
    pub fn centroid(&self) -> GeoPoint {
        self.polygon.centroid().map_or(self.center, |p| GeoPoint {
            lat: p.y(),
            lng: p.x(),
        })
    }

    /// The generator point this buffer was built around.
    #[must_use]
    pub const fn center(&self) -> GeoPoint {
        self.center
    }

    /// The buffer radius in miles.
    #[must_use]
    pub const fn radius_miles(&self) -> f64 {
        self.radius_miles
    }

    /// The underlying ring polygon (closed, counter-clockwise).
    #[must_use]
    pub const fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    /// Exports the buffer ring as a `GeoJSON` polygon geometry.
    #[must_use]
    pub fn to_geojson(&self) -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::from(&self.polygon))
    }
}

/// Destination point on the sphere given a start, an initial bearing in
/// degrees, and a distance in miles.
fn destination_point(lat: f64, lng: f64, bearing_deg: f64, distance_miles: f64) -> (f64, f64) {
    let angular = distance_miles / EARTH_RADIUS_MILES;
    let bearing = bearing_deg.to_radians();
    let lat1 = lat.to_radians();
    let lng1 = lng.to_radians();

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
    let lng2 = lng1
        + (bearing.sin() * angular.sin() * lat1.cos())
            .atan2(angular.cos() - lat1.sin() * lat2.sin());

    // Normalize longitude back into -180..=180
    let lng2_deg = (lng2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
    (lat2.to_degrees(), lng2_deg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance_miles;

    #[test]
    fn centroid_matches_generator_center() {
        let center = GeoPoint {
            lat: 30.2672,
            lng: -97.7431,
        };
        let buffer = BufferZone::build(center, 5.0).unwrap();
        let centroid = buffer.centroid();
        let offset = distance_miles(center.lat, center.lng, centroid.lat, centroid.lng);
        assert!(offset < 0.1, "centroid drifted {offset} miles from center");
    }

    #[test]
    fn ring_points_sit_on_the_radius() {
        let center = GeoPoint {
            lat: 30.0,
            lng: -97.0,
        };
        let buffer = BufferZone::build(center, 10.0).unwrap();
        for coord in buffer.polygon().exterior() {
            let d = distance_miles(center.lat, center.lng, coord.y, coord.x);
            assert!((d - 10.0).abs() < 0.05, "ring point {d} miles from center");
        }
    }

    #[test]
    fn ring_is_closed() {
        let center = GeoPoint {
            lat: 45.0,
            lng: 7.0,
        };
        let buffer = BufferZone::build(center, 2.0).unwrap();
        let ring = buffer.polygon().exterior();
        assert_eq!(ring.0.len(), BUFFER_SEGMENTS as usize + 1);
        assert_eq!(ring.0.first(), ring.0.last());
    }

    #[test]
    fn rejects_invalid_center() {
        let center = GeoPoint {
            lat: 999.0,
            lng: -97.0,
        };
        let err = BufferZone::build(center, 5.0).unwrap_err();
        assert!(matches!(err, GeoError::InvalidLocation { .. }));
    }

    #[test]
    fn rejects_non_positive_radius() {
        let center = GeoPoint {
            lat: 30.0,
            lng: -97.0,
        };
        assert!(matches!(
            BufferZone::build(center, 0.0),
            Err(GeoError::InvalidRadius(_))
        ));
        assert!(matches!(
            BufferZone::build(center, -1.0),
            Err(GeoError::InvalidRadius(_))
        ));
    }

    #[test]
    fn exports_geojson_polygon() {
        let center = GeoPoint {
            lat: 30.0,
            lng: -97.0,
        };
        let buffer = BufferZone::build(center, 1.0).unwrap();
        let geometry = buffer.to_geojson();
        assert!(matches!(geometry.value, geojson::Value::Polygon(_)));
    }
}
