//! Place catalog
//!
//! The catalog is seeded once at startup and never mutated afterwards. Callers
//! only see it through the read-only [`PlaceRepository`] interface so tests can
//! swap in their own records.

pub mod query;

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::TourGuideError;
use crate::models::Place;

pub use query::{query, seasons, states};

const EMBEDDED_CATALOG: &str = include_str!("places.json");

/// Read-only access to the place catalog
pub trait PlaceRepository: Send + Sync {
    /// Every place, in catalog order
    fn all(&self) -> &[Place];

    fn find(&self, id: u32) -> Option<&Place> {
        self.all().iter().find(|place| place.id == id)
    }
}

/// In-memory catalog backed by a fixed list of places
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    places: Vec<Place>,
}

impl StaticCatalog {
    /// Catalog built into the binary (Meghalaya and Guwahati)
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_CATALOG).context("Failed to parse embedded place catalog")
    }

    /// Load a catalog from a JSON file holding an array of places
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading place catalog from {}", path.display());
        let raw = std::fs::read_to_string(path)
            .map_err(TourGuideError::from)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid catalog file: {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let places: Vec<Place> = serde_json::from_str(raw)?;
        Ok(Self::from_places(places)?)
    }

    /// Build a catalog, rejecting duplicate ids and empty season tags
    pub fn from_places(places: Vec<Place>) -> crate::Result<Self> {
        let mut ids = HashSet::new();
        for place in &places {
            if !ids.insert(place.id) {
                return Err(TourGuideError::validation(format!(
                    "Duplicate place id {} ({})",
                    place.id, place.name
                )));
            }
            if place.season.trim().is_empty() {
                return Err(TourGuideError::validation(format!(
                    "Place {} ({}) has no season",
                    place.id, place.name
                )));
            }
        }

        info!("Seeded place catalog with {} places", places.len());
        Ok(Self { places })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl PlaceRepository for StaticCatalog {
    fn all(&self) -> &[Place] {
        &self.places
    }
}
