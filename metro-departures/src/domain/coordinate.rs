//! Geographic coordinates and the neighbourhood-scale distance metric.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude in degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Planar Euclidean distance to `other`, in raw degrees.
    ///
    /// Latitude and longitude degrees are treated as equal-length axes.
    /// That is only good enough at neighbourhood scale; it is not a
    /// geodesic distance.
    ///
    /// # Examples
    ///
    /// ```
    /// use metro_departures::domain::Coordinate;
    ///
    /// let a = Coordinate::new(0.0, 0.0);
    /// let b = Coordinate::new(3.0, 4.0);
    /// assert_eq!(a.planar_distance(&b), 5.0);
    /// ```
    pub fn planar_distance(&self, other: &Coordinate) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        (dlat * dlat + dlon * dlon).sqrt()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lon)
    }
}
