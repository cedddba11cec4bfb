//! Great-circle distance filtering

use serde::Serialize;

use crate::models::{Coordinate, Place};

/// Haversine distance in kilometers (Earth radius 6371 km)
#[must_use]
pub fn distance_km(from: Coordinate, to: Coordinate) -> f64 {
    haversine::distance(from.into(), to.into(), haversine::Units::Kilometers)
}

/// Places whose distance from `origin` is at most `radius_km`, in input order
#[must_use]
pub fn within_radius(origin: Coordinate, radius_km: f64, places: &[Place]) -> Vec<Place> {
    places
        .iter()
        .filter(|place| distance_km(origin, place.coordinate()) <= radius_km)
        .cloned()
        .collect()
}

/// A place together with its distance from the search origin
#[derive(Debug, Clone, Serialize)]
pub struct NearbyPlace {
    #[serde(flatten)]
    pub place: Place,
    pub distance_km: f64,
}

/// Like [`within_radius`], keeping the computed distance and sorting closest first
#[must_use]
pub fn nearby(origin: Coordinate, radius_km: f64, places: &[Place]) -> Vec<NearbyPlace> {
    let mut results: Vec<NearbyPlace> = places
        .iter()
        .map(|place| NearbyPlace {
            distance_km: distance_km(origin, place.coordinate()),
            place: place.clone(),
        })
        .filter(|nearby| nearby.distance_km <= radius_km)
        .collect();

    results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    results
}
