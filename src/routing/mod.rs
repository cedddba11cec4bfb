//! Route acquisition
//!
//! Routes are requested from OSRM first and from OpenRouteService when OSRM
//! fails. Both providers answer in their own shape; [`RouteResult`] carries the
//! raw answer until it is normalized into a [`Route`].

pub mod ors;
pub mod osrm;
pub mod polyline;
pub mod service;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::TourGuideError;
use crate::models::Coordinate;

pub use ors::OrsProvider;
pub use osrm::OsrmProvider;
pub use service::RouteService;

/// How the traveller moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Driving,
    Walking,
    Cycling,
}

impl TransportMode {
    /// OSRM profile segment
    #[must_use]
    pub fn osrm_profile(self) -> &'static str {
        match self {
            TransportMode::Driving => "car",
            TransportMode::Walking => "foot",
            TransportMode::Cycling => "bike",
        }
    }

    /// OpenRouteService profile segment
    #[must_use]
    pub fn ors_profile(self) -> &'static str {
        match self {
            TransportMode::Driving => "driving-car",
            TransportMode::Walking => "foot-walking",
            TransportMode::Cycling => "cycling-regular",
        }
    }
}

impl FromStr for TransportMode {
    type Err = TourGuideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "driving" | "car" | "driving-car" => Ok(TransportMode::Driving),
            "walking" | "foot" | "foot-walking" => Ok(TransportMode::Walking),
            "cycling" | "bike" | "cycling-regular" => Ok(TransportMode::Cycling),
            other => Err(TourGuideError::validation(format!(
                "Unknown transport mode '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    #[default]
    Fastest,
    Shortest,
}

impl Preference {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Preference::Fastest => "fastest",
            Preference::Shortest => "shortest",
        }
    }
}

impl FromStr for Preference {
    type Err = TourGuideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fastest" => Ok(Preference::Fastest),
            "shortest" => Ok(Preference::Shortest),
            other => Err(TourGuideError::validation(format!(
                "Unknown route preference '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteSource {
    Osrm,
    OpenRouteService,
}

impl fmt::Display for RouteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteSource::Osrm => write!(f, "OSRM"),
            RouteSource::OpenRouteService => write!(f, "OpenRouteService"),
        }
    }
}

/// What to route and how
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub mode: TransportMode,
    pub preference: Preference,
}

/// A normalized route, independent of the provider that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub path: Vec<Coordinate>,
    pub distance_km: f64,
    pub duration_seconds: f64,
    /// `duration_seconds` as "H hr M min" / "M min"
    pub duration: String,
    pub preference: Preference,
    pub source: RouteSource,
}

/// Raw provider answer, before geometry decoding
#[derive(Debug, Clone, PartialEq)]
pub enum RouteResult {
    /// Encoded polyline, meters, seconds
    Osrm {
        geometry: String,
        distance_m: f64,
        duration_s: f64,
    },
    /// GeoJSON `[lon, lat]` pairs, meters, seconds
    OpenRouteService {
        coordinates: Vec<[f64; 2]>,
        distance_m: f64,
        duration_s: f64,
    },
}

impl RouteResult {
    /// Decode the geometry and convert units
    pub fn normalize(self, preference: Preference) -> crate::Result<Route> {
        let (path, distance_m, duration_s, source) = match self {
            RouteResult::Osrm {
                geometry,
                distance_m,
                duration_s,
            } => {
                let path = polyline::decode(&geometry).map_err(|e| {
                    TourGuideError::upstream("OSRM", format!("Invalid route geometry: {e}"))
                })?;
                (path, distance_m, duration_s, RouteSource::Osrm)
            }
            RouteResult::OpenRouteService {
                coordinates,
                distance_m,
                duration_s,
            } => {
                let path = coordinates
                    .into_iter()
                    .map(Coordinate::from_lon_lat)
                    .collect();
                (path, distance_m, duration_s, RouteSource::OpenRouteService)
            }
        };

        Ok(Route {
            path,
            distance_km: distance_m / 1000.0,
            duration_seconds: duration_s,
            duration: format_duration(duration_s),
            preference,
            source,
        })
    }
}

/// A routing backend
#[async_trait]
pub trait RouteProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_route(&self, request: &RouteRequest) -> crate::Result<RouteResult>;
}

/// Format seconds as "H hr M min", or "M min" under an hour
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;

    if hours > 0 {
        format!("{hours} hr {minutes} min")
    } else {
        format!("{minutes} min")
    }
}
