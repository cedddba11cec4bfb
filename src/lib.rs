//! `TourGuide` - tourist information service for Meghalaya and Guwahati
//!
//! This library provides the place catalog and its filters, great-circle
//! radius search, route acquisition with provider fallback, and nearby
//! hotel and geocoding lookups behind a small HTTP API.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod geo;
pub mod http;
pub mod lookup;
pub mod models;
pub mod routing;
pub mod session;
pub mod telemetry;
pub mod web;

// Re-export core types for public API
pub use catalog::{PlaceRepository, StaticCatalog};
pub use config::TourGuideConfig;
pub use error::TourGuideError;
pub use models::{Coordinate, Place, QueryCriteria};
pub use routing::{Preference, Route, RouteService, TransportMode};
pub use session::MapSession;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TourGuideError>;
