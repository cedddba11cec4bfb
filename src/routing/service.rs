//! Primary/fallback route acquisition

use anyhow::Result;
use tracing::{info, instrument, warn};

use super::{
    OrsProvider, OsrmProvider, Preference, Route, RouteProvider, RouteRequest, TransportMode,
};
use crate::TourGuideError;
use crate::config::RoutingConfig;
use crate::models::Coordinate;

/// Asks the primary provider, then the fallback once, then gives up
pub struct RouteService {
    primary: Box<dyn RouteProvider>,
    fallback: Option<Box<dyn RouteProvider>>,
}

impl RouteService {
    pub fn new(primary: Box<dyn RouteProvider>, fallback: Option<Box<dyn RouteProvider>>) -> Self {
        Self { primary, fallback }
    }

    /// OSRM first, OpenRouteService when an API key is configured
    pub fn from_config(config: &RoutingConfig, user_agent: &str) -> Result<Self> {
        let client = crate::http::client(user_agent)?;
        let primary = OsrmProvider::new(client.clone(), config.osrm_base_url.clone());

        let fallback: Option<Box<dyn RouteProvider>> = match &config.ors_api_key {
            Some(api_key) => Some(Box::new(OrsProvider::new(
                client,
                config.ors_base_url.clone(),
                api_key.clone(),
            ))),
            None => {
                warn!("No OpenRouteService API key configured, route fallback disabled");
                None
            }
        };

        Ok(Self::new(Box::new(primary), fallback))
    }

    /// Fetch a route. Fails with `RouteUnavailable` carrying the last provider
    /// error once every provider has failed.
    #[instrument(skip(self))]
    pub async fn get_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TransportMode,
        preference: Preference,
    ) -> crate::Result<Route> {
        if !origin.is_valid() || !destination.is_valid() {
            return Err(TourGuideError::validation(
                "Route endpoints must be valid latitude/longitude pairs",
            ));
        }

        let request = RouteRequest {
            origin,
            destination,
            mode,
            preference,
        };

        let primary_error = match self.attempt(self.primary.as_ref(), &request).await {
            Ok(route) => return Ok(route),
            Err(e) => e,
        };

        let Some(fallback) = &self.fallback else {
            return Err(TourGuideError::route_unavailable(primary_error.to_string()));
        };

        warn!(
            "{} failed ({}), falling back to {}",
            self.primary.name(),
            primary_error,
            fallback.name()
        );

        self.attempt(fallback.as_ref(), &request)
            .await
            .map_err(|e| TourGuideError::route_unavailable(e.to_string()))
    }

    async fn attempt(
        &self,
        provider: &dyn RouteProvider,
        request: &RouteRequest,
    ) -> crate::Result<Route> {
        let route = provider
            .fetch_route(request)
            .await?
            .normalize(request.preference)?;

        info!(
            "Route from {} ({} points, {:.1} km, {})",
            route.source,
            route.path.len(),
            route.distance_km,
            route.duration
        );
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{RouteResult, RouteSource};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeProvider {
        name: &'static str,
        result: Option<RouteResult>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl RouteProvider for FakeProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch_route(&self, _request: &RouteRequest) -> crate::Result<RouteResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .clone()
                .ok_or_else(|| TourGuideError::upstream(self.name, "HTTP 500"))
        }
    }

    fn provider(
        name: &'static str,
        result: Option<RouteResult>,
    ) -> (Box<dyn RouteProvider>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = FakeProvider {
            name,
            result,
            calls: calls.clone(),
        };
        (Box::new(provider), calls)
    }

    fn osrm_ok() -> RouteResult {
        RouteResult::Osrm {
            geometry: "_p~iF~ps|U".to_string(),
            distance_m: 1000.0,
            duration_s: 125.0,
        }
    }

    fn ors_ok() -> RouteResult {
        RouteResult::OpenRouteService {
            coordinates: vec![[91.8221, 25.5562]],
            distance_m: 2000.0,
            duration_s: 3725.0,
        }
    }

    async fn route(service: &RouteService) -> crate::Result<Route> {
        service
            .get_route(
                Coordinate::new(25.5562, 91.8221),
                Coordinate::new(26.164, 91.7035),
                TransportMode::Driving,
                Preference::Fastest,
            )
            .await
    }

    #[tokio::test]
    async fn test_primary_success_skips_fallback() {
        let (primary, primary_calls) = provider("OSRM", Some(osrm_ok()));
        let (fallback, fallback_calls) = provider("ORS", Some(ors_ok()));
        let service = RouteService::new(primary, Some(fallback));

        let route = route(&service).await.unwrap();
        assert_eq!(route.source, RouteSource::Osrm);
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_primary_failure_uses_fallback_once() {
        let (primary, primary_calls) = provider("OSRM", None);
        let (fallback, fallback_calls) = provider("ORS", Some(ors_ok()));
        let service = RouteService::new(primary, Some(fallback));

        let route = route(&service).await.unwrap();
        assert_eq!(route.source, RouteSource::OpenRouteService);
        assert_eq!(route.duration, "1 hr 2 min");
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_undecodable_primary_geometry_uses_fallback() {
        let broken = RouteResult::Osrm {
            geometry: "_p~i".to_string(),
            distance_m: 1.0,
            duration_s: 1.0,
        };
        let (primary, _) = provider("OSRM", Some(broken));
        let (fallback, fallback_calls) = provider("ORS", Some(ors_ok()));
        let service = RouteService::new(primary, Some(fallback));

        assert!(route(&service).await.is_ok());
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_both_fail_reports_last_error() {
        let (primary, _) = provider("OSRM", None);
        let (fallback, _) = provider("ORS", None);
        let service = RouteService::new(primary, Some(fallback));

        let err = route(&service).await.unwrap_err();
        match err {
            TourGuideError::RouteUnavailable { message } => assert!(message.contains("ORS")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_fallback_configured() {
        let (primary, _) = provider("OSRM", None);
        let service = RouteService::new(primary, None);

        let err = route(&service).await.unwrap_err();
        assert!(matches!(err, TourGuideError::RouteUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_invalid_coordinates_rejected() {
        let (primary, calls) = provider("OSRM", Some(osrm_ok()));
        let service = RouteService::new(primary, None);

        let err = service
            .get_route(
                Coordinate::new(95.0, 91.8),
                Coordinate::new(26.1, 91.7),
                TransportMode::Walking,
                Preference::Fastest,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TourGuideError::Validation { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
