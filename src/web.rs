use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};
use crate::catalog::{PlaceRepository, StaticCatalog};
use crate::config::TourGuideConfig;
use crate::lookup::{NominatimClient, OverpassClient};
use crate::routing::RouteService;

/// Wire the catalog and provider clients from configuration
pub fn build_state(config: &TourGuideConfig) -> Result<AppState> {
    let catalog = match &config.server.catalog_path {
        Some(path) => StaticCatalog::from_file(path)?,
        None => StaticCatalog::embedded()?,
    };

    let user_agent = &config.lookup.user_agent;
    let lookup_client = crate::http::retrying_client(user_agent, config.lookup.max_retries)?;

    Ok(AppState {
        catalog: Arc::new(catalog) as Arc<dyn PlaceRepository>,
        routes: Arc::new(RouteService::from_config(&config.routing, user_agent)?),
        geocoder: Arc::new(NominatimClient::new(
            lookup_client.clone(),
            config.lookup.nominatim_base_url.clone(),
        )),
        hotels: Arc::new(OverpassClient::new(
            lookup_client,
            config.lookup.overpass_base_url.clone(),
            config.lookup.hotel_radius_m,
        )),
    })
}

pub fn app(state: AppState, static_dir: Option<&str>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new().nest("/api", api::router(state));

    let app = match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app.route("/", get(|| async { "Tourist Guide Platform API" })),
    };

    app.layer(TraceLayer::new_for_http()).layer(cors)
}

pub async fn run(config: &TourGuideConfig) -> Result<()> {
    let state = build_state(config)?;
    let app = app(state, config.server.static_dir.as_deref());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", config.server.port);
    axum::serve(listener, app).await.context("Web server stopped")?;
    Ok(())
}
