//! Nominatim geocoding client

use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::TourGuideError;
use crate::models::Coordinate;

const PROVIDER: &str = "Nominatim";

/// Nominatim returns lat/lon as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    place_id: u64,
    lat: String,
    lon: String,
    display_name: String,
}

/// A geocoding hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeResult {
    pub place_id: u64,
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeocodeResult {
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl TryFrom<NominatimPlace> for GeocodeResult {
    type Error = std::num::ParseFloatError;

    fn try_from(place: NominatimPlace) -> Result<Self, Self::Error> {
        Ok(Self {
            place_id: place.place_id,
            latitude: place.lat.parse()?,
            longitude: place.lon.parse()?,
            display_name: place.display_name,
        })
    }
}

pub struct NominatimClient {
    client: ClientWithMiddleware,
    base_url: String,
}

impl NominatimClient {
    pub fn new(client: ClientWithMiddleware, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?format=json&q={}&limit=5&countrycodes=in",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    /// Search places in India by name. No hits is an empty list, not an error.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> crate::Result<Vec<GeocodeResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(TourGuideError::validation("Search text cannot be empty"));
        }

        let url = self.search_url(query);
        debug!("Nominatim request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TourGuideError::upstream(PROVIDER, format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TourGuideError::upstream(PROVIDER, format!("HTTP {status}")));
        }

        let places: Vec<NominatimPlace> = response.json().await.map_err(|e| {
            TourGuideError::upstream(PROVIDER, format!("Failed to parse response: {e}"))
        })?;

        let results: Vec<GeocodeResult> = places
            .into_iter()
            .filter_map(|place| {
                let name = place.display_name.clone();
                GeocodeResult::try_from(place)
                    .inspect_err(|e| warn!("Skipping '{}' with bad coordinates: {}", name, e))
                    .ok()
            })
            .collect();

        if results.is_empty() {
            warn!("No results found for location '{}'", query);
        } else {
            info!("Found {} geocoding results for '{}'", results.len(), query);
        }

        Ok(results)
    }
}
