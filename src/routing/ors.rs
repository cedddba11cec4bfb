//! OpenRouteService routing provider (fallback)

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, error, instrument};

use super::{RouteProvider, RouteRequest, RouteResult};
use crate::TourGuideError;

const PROVIDER: &str = "OpenRouteService";

#[derive(Debug, Deserialize)]
struct OrsErrorDetail {
    #[serde(default)]
    code: Option<u32>,
    message: String,
}

#[derive(Debug, Deserialize)]
struct OrsErrorPayload {
    error: OrsErrorDetail,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct Properties {
    summary: Summary,
}

// ORS leaves out zero values
#[derive(Debug, Deserialize)]
struct Summary {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

pub struct OrsProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OrsProvider {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn directions_url(&self, request: &RouteRequest) -> String {
        format!(
            "{}/v2/directions/{}",
            self.base_url,
            request.mode.ors_profile()
        )
    }

    #[must_use]
    pub fn request_body(request: &RouteRequest) -> Value {
        json!({
            "coordinates": [request.origin.to_lon_lat(), request.destination.to_lon_lat()],
            "format": "geojson",
            "instructions": true,
            "preference": request.preference.as_str(),
        })
    }
}

#[async_trait]
impl RouteProvider for OrsProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    #[instrument(skip(self), fields(mode = ?request.mode))]
    async fn fetch_route(&self, request: &RouteRequest) -> crate::Result<RouteResult> {
        let url = self.directions_url(request);
        let body = Self::request_body(request);
        debug!("OpenRouteService request: POST {} {}", url, body);

        let response = self
            .client
            .post(&url)
            .header("Authorization", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TourGuideError::upstream(PROVIDER, format!("Request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TourGuideError::upstream(PROVIDER, format!("Failed to read body: {e}")))?;

        if !status.is_success() {
            // Try to parse the structured error first
            let message = match serde_json::from_str::<OrsErrorPayload>(&text) {
                Ok(payload) => match payload.error.code {
                    Some(code) => format!("HTTP {status} (code {code}): {}", payload.error.message),
                    None => format!("HTTP {status}: {}", payload.error.message),
                },
                Err(_) => {
                    error!("OpenRouteService returned {} with unparseable body: {}", status, text);
                    format!("HTTP {status}")
                }
            };
            return Err(TourGuideError::upstream(PROVIDER, message));
        }

        let directions: DirectionsResponse = serde_json::from_str(&text).map_err(|e| {
            TourGuideError::upstream(PROVIDER, format!("Failed to parse response: {e}"))
        })?;

        let feature = directions
            .features
            .into_iter()
            .next()
            .ok_or_else(|| TourGuideError::upstream(PROVIDER, "No route found in response"))?;

        Ok(RouteResult::OpenRouteService {
            coordinates: feature.geometry.coordinates,
            distance_m: feature.properties.summary.distance,
            duration_s: feature.properties.summary.duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use crate::routing::{Preference, TransportMode};

    fn request() -> RouteRequest {
        RouteRequest {
            origin: Coordinate::new(25.5562, 91.8221),
            destination: Coordinate::new(26.164, 91.7035),
            mode: TransportMode::Cycling,
            preference: Preference::Shortest,
        }
    }

    #[test]
    fn test_request_shape() {
        let provider = OrsProvider::new(Client::new(), "https://ors.example.org/", "key");
        assert_eq!(
            provider.directions_url(&request()),
            "https://ors.example.org/v2/directions/cycling-regular"
        );

        let body = OrsProvider::request_body(&request());
        assert_eq!(
            body,
            json!({
                "coordinates": [[91.8221, 25.5562], [91.7035, 26.164]],
                "format": "geojson",
                "instructions": true,
                "preference": "shortest",
            })
        );
    }

    #[test]
    fn test_parse_geojson_response() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "LineString", "coordinates": [[91.8221, 25.5562], [91.7035, 26.164]]},
                "properties": {"summary": {"distance": 98765.4, "duration": 7384.6}}
            }]
        }"#;
        let directions: DirectionsResponse = serde_json::from_str(text).unwrap();
        let feature = &directions.features[0];
        assert_eq!(feature.geometry.coordinates.len(), 2);
        assert_eq!(feature.properties.summary.distance, 98765.4);
    }

    #[test]
    fn test_parse_error_payload() {
        let text = r#"{"error":{"code":2010,"message":"Could not find routable point"}}"#;
        let payload: OrsErrorPayload = serde_json::from_str(text).unwrap();
        assert_eq!(payload.error.code, Some(2010));
    }
}
