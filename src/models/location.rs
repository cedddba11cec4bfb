//! Coordinate model for WGS84 positions

use serde::{Deserialize, Serialize};

/// A (latitude, longitude) pair in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build from a `[lon, lat]` pair as used by GeoJSON
    #[must_use]
    pub fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self::new(pair[1], pair[0])
    }

    /// `[lon, lat]` pair as used by GeoJSON and OpenRouteService
    #[must_use]
    pub fn to_lon_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Whether both components are inside the valid WGS84 ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl From<Coordinate> for haversine::Location {
    fn from(coordinate: Coordinate) -> Self {
        haversine::Location {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        }
    }
}
