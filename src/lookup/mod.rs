//! Nearby lookups against OpenStreetMap services
//!
//! - Geocoding: free-text place search through Nominatim
//! - Hotels: accommodation around a place through Overpass

pub mod geocode;
pub mod hotels;

pub use geocode::{GeocodeResult, NominatimClient};
pub use hotels::{Hotel, OverpassClient};
