//! Map view session state
//!
//! The browser map keeps a selected season, the fetched places, the user's
//! position and a search radius. This module holds that state and exposes it
//! as plain commands and queries so any front end can drive it.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::TourGuideError;
use crate::geo;
use crate::lookup::GeocodeResult;
use crate::models::{ALL_SEASONS, Coordinate, Place, QueryCriteria};

/// Radius choices offered next to the map, in km
pub const RADIUS_OPTIONS_KM: [u32; 3] = [5, 10, 20];
pub const DEFAULT_RADIUS_KM: u32 = 20;
/// Map centre when the user's position is unknown (central Meghalaya)
pub const MEGHALAYA_CENTER: Coordinate = Coordinate {
    latitude: 25.467,
    longitude: 91.366,
};

/// Options for a position request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocateOptions {
    pub timeout: Duration,
    /// Oldest cached fix that may be returned; zero forces a fresh fix
    pub maximum_age: Duration,
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            maximum_age: Duration::ZERO,
        }
    }
}

/// Source of the user's current position
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self, options: &LocateOptions) -> crate::Result<Coordinate>;
}

/// Stand-in for environments without any position source
pub struct NoGeolocation;

#[async_trait]
impl Geolocator for NoGeolocation {
    async fn current_position(&self, _options: &LocateOptions) -> crate::Result<Coordinate> {
        Err(TourGuideError::unsupported(
            "Geolocation is not supported in this environment",
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GpsStatus {
    Pending,
    Granted,
    Denied,
}

#[derive(Debug, Clone)]
pub struct MapSession {
    season: String,
    places: Vec<Place>,
    user_location: Option<Coordinate>,
    radius_km: u32,
    gps_status: GpsStatus,
}

impl Default for MapSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            season: ALL_SEASONS.to_string(),
            places: Vec::new(),
            user_location: None,
            radius_km: DEFAULT_RADIUS_KM,
            gps_status: GpsStatus::Pending,
        }
    }

    /// Select a season; returns the criteria to fetch places with
    pub fn select_season(&mut self, season: impl Into<String>) -> QueryCriteria {
        self.season = season.into();
        self.criteria()
    }

    #[must_use]
    pub fn criteria(&self) -> QueryCriteria {
        QueryCriteria::default().with_season(self.season.clone())
    }

    /// Replace the current places with a fetch result.
    ///
    /// Fetches are not cancelled, so whichever result arrives last wins.
    pub fn apply_places(&mut self, places: Vec<Place>) {
        debug!("Showing {} places for season '{}'", places.len(), self.season);
        self.places = places;
    }

    /// Ask for the user's position. On failure the position is cleared and
    /// every place stays visible.
    pub async fn locate(&mut self, geolocator: &dyn Geolocator) -> crate::Result<Coordinate> {
        self.locate_with(geolocator, LocateOptions::default()).await
    }

    /// Like [`MapSession::locate`]; gives up once `options.timeout` elapses
    pub async fn locate_with(
        &mut self,
        geolocator: &dyn Geolocator,
        options: LocateOptions,
    ) -> crate::Result<Coordinate> {
        self.gps_status = GpsStatus::Pending;

        let outcome = tokio::time::timeout(options.timeout, geolocator.current_position(&options))
            .await
            .unwrap_or_else(|_| {
                Err(TourGuideError::upstream(
                    "Geolocation",
                    format!("No position within {:?}", options.timeout),
                ))
            });

        match outcome {
            Ok(position) => {
                self.user_location = Some(position);
                self.gps_status = GpsStatus::Granted;
                Ok(position)
            }
            Err(e) => {
                warn!("Position unavailable: {}", e);
                self.user_location = None;
                self.gps_status = GpsStatus::Denied;
                Err(e)
            }
        }
    }

    /// Show the results of a place search; returns the message to display
    /// when nothing matched
    pub fn apply_search(&mut self, term: &str, places: Vec<Place>) -> Option<String> {
        let message = search_message(term, &places);
        self.apply_places(places);
        message
    }

    pub fn set_radius(&mut self, radius_km: u32) -> crate::Result<()> {
        if !RADIUS_OPTIONS_KM.contains(&radius_km) {
            return Err(TourGuideError::validation(format!(
                "Radius must be one of {RADIUS_OPTIONS_KM:?} km, got {radius_km}"
            )));
        }
        self.radius_km = radius_km;
        Ok(())
    }

    #[must_use]
    pub fn radius_km(&self) -> u32 {
        self.radius_km
    }

    #[must_use]
    pub fn gps_status(&self) -> GpsStatus {
        self.gps_status
    }

    #[must_use]
    pub fn user_location(&self) -> Option<Coordinate> {
        self.user_location
    }

    /// Radius control only applies once a position is known
    #[must_use]
    pub fn radius_enabled(&self) -> bool {
        self.gps_status == GpsStatus::Granted
    }

    /// Places within the radius when a position is known, otherwise all of them
    #[must_use]
    pub fn visible_places(&self) -> Vec<Place> {
        match self.user_location {
            Some(origin) => geo::within_radius(origin, f64::from(self.radius_km), &self.places),
            None => self.places.clone(),
        }
    }

    /// Distance from the user to a place, when the position is known
    #[must_use]
    pub fn distance_to(&self, place: &Place) -> Option<f64> {
        self.user_location
            .map(|origin| geo::distance_km(origin, place.coordinate()))
    }

    #[must_use]
    pub fn map_center(&self) -> Coordinate {
        self.user_location.unwrap_or(MEGHALAYA_CENTER)
    }

    #[must_use]
    pub fn status_message(&self) -> &'static str {
        match self.gps_status {
            GpsStatus::Pending => "Asking for GPS...",
            GpsStatus::Granted => "Showing places near you",
            GpsStatus::Denied => "GPS unavailable (showing all)",
        }
    }
}

/// Informational text for a place search that found nothing
#[must_use]
pub fn search_message(term: &str, results: &[Place]) -> Option<String> {
    results
        .is_empty()
        .then(|| format!("No places found for \"{term}\""))
}

/// Informational text for a geocode lookup that found nothing
#[must_use]
pub fn geocode_message(query: &str, results: &[GeocodeResult]) -> Option<String> {
    results
        .is_empty()
        .then(|| format!("Location \"{query}\" not found"))
}
