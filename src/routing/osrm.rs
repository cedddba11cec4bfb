//! OSRM routing provider (primary)

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{Preference, RouteProvider, RouteRequest, RouteResult};
use crate::TourGuideError;

const PROVIDER: &str = "OSRM";

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: String,
    /// meters
    distance: f64,
    /// seconds
    duration: f64,
}

pub struct OsrmProvider {
    client: Client,
    base_url: String,
}

impl OsrmProvider {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `GET /route/v1/{profile}/{lon},{lat};{lon},{lat}`
    #[must_use]
    pub fn route_url(&self, request: &RouteRequest) -> String {
        let weight = match request.preference {
            Preference::Shortest => "&weight=distance",
            Preference::Fastest => "",
        };
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=polyline{}",
            self.base_url,
            request.mode.osrm_profile(),
            request.origin.longitude,
            request.origin.latitude,
            request.destination.longitude,
            request.destination.latitude,
            weight
        )
    }
}

#[async_trait]
impl RouteProvider for OsrmProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    #[instrument(skip(self), fields(mode = ?request.mode))]
    async fn fetch_route(&self, request: &RouteRequest) -> crate::Result<RouteResult> {
        let url = self.route_url(request);
        debug!("OSRM request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TourGuideError::upstream(PROVIDER, format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("OSRM answered with HTTP {}", status);
            return Err(TourGuideError::upstream(
                PROVIDER,
                format!("HTTP {status}"),
            ));
        }

        let body: OsrmResponse = response.json().await.map_err(|e| {
            TourGuideError::upstream(PROVIDER, format!("Failed to parse response: {e}"))
        })?;

        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| TourGuideError::upstream(PROVIDER, "No routes in response"))?;

        Ok(RouteResult::Osrm {
            geometry: route.geometry,
            distance_m: route.distance,
            duration_s: route.duration,
        })
    }
}
