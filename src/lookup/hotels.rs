//! Overpass hotel search around a place

use std::collections::HashMap;

use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::TourGuideError;
use crate::models::Coordinate;

const PROVIDER: &str = "Overpass";

/// Tourism tags counted as accommodation
pub const ACCOMMODATION_KINDS: [&str; 5] = ["hotel", "hostel", "guest_house", "apartment", "resort"];

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    id: u64,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

/// An accommodation node near a place
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hotel {
    pub id: u64,
    pub name: String,
    /// Value of the `tourism` tag
    pub kind: String,
    pub street: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<OverpassElement> for Hotel {
    fn from(mut element: OverpassElement) -> Self {
        Self {
            id: element.id,
            name: element
                .tags
                .remove("name")
                .unwrap_or_else(|| "Unnamed".to_string()),
            kind: element
                .tags
                .remove("tourism")
                .unwrap_or_else(|| "hotel".to_string()),
            street: element.tags.remove("addr:street"),
            latitude: element.lat,
            longitude: element.lon,
        }
    }
}

pub struct OverpassClient {
    client: ClientWithMiddleware,
    base_url: String,
    radius_m: u32,
}

impl OverpassClient {
    pub fn new(client: ClientWithMiddleware, base_url: impl Into<String>, radius_m: u32) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            radius_m,
        }
    }

    /// Overpass QL selecting accommodation nodes within the radius
    #[must_use]
    pub fn build_query(&self, center: Coordinate) -> String {
        format!(
            "[out:json][timeout:25];\nnode[\"tourism\"~\"^({})$\"](around:{},{},{});\nout body;",
            ACCOMMODATION_KINDS.join("|"),
            self.radius_m,
            center.latitude,
            center.longitude
        )
    }

    #[instrument(skip(self))]
    pub async fn hotels_near(&self, center: Coordinate) -> crate::Result<Vec<Hotel>> {
        let url = format!("{}/api/interpreter", self.base_url);
        let query = self.build_query(center);
        debug!("Overpass query: {}", query);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(format!("data={}", urlencoding::encode(&query)))
            .send()
            .await
            .map_err(|e| TourGuideError::upstream(PROVIDER, format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TourGuideError::upstream(PROVIDER, format!("HTTP {status}")));
        }

        let body: OverpassResponse = response.json().await.map_err(|e| {
            TourGuideError::upstream(PROVIDER, format!("Failed to parse response: {e}"))
        })?;

        let hotels: Vec<Hotel> = body.elements.into_iter().map(Hotel::from).collect();
        info!(
            "Found {} hotels within {} m of {}",
            hotels.len(),
            self.radius_m,
            center.format_coordinates()
        );
        Ok(hotels)
    }
}
