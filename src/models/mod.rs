//! Data models for the tour guide service
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates
//! - Place: Catalog records and query criteria

pub mod location;
pub mod place;

// Re-export all public types for convenient access
pub use location::Coordinate;
pub use place::{ALL_SEASONS, Place, QueryCriteria};
