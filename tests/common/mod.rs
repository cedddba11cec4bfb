//! Helpers shared by the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use tourguide::api::AppState;
use tourguide::config::RoutingConfig;
use tourguide::lookup::{NominatimClient, OverpassClient};
use tourguide::{PlaceRepository, RouteService, StaticCatalog};

/// Serve a router on an ephemeral local port, returning its base URL
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Base URL that refuses connections
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

pub fn routing_config(osrm: &str, ors: &str, api_key: Option<&str>) -> RoutingConfig {
    RoutingConfig {
        osrm_base_url: osrm.to_string(),
        ors_base_url: ors.to_string(),
        ors_api_key: api_key.map(str::to_string),
    }
}

/// Application state over the embedded catalog with the given providers
pub fn state(routing: RoutingConfig, lookup_base: &str) -> AppState {
    let lookup_client = tourguide::http::retrying_client("tourguide-tests", 0).unwrap();
    AppState {
        catalog: Arc::new(StaticCatalog::embedded().unwrap()) as Arc<dyn PlaceRepository>,
        routes: Arc::new(RouteService::from_config(&routing, "tourguide-tests").unwrap()),
        geocoder: Arc::new(NominatimClient::new(lookup_client.clone(), lookup_base)),
        hotels: Arc::new(OverpassClient::new(lookup_client, lookup_base, 5000)),
    }
}
