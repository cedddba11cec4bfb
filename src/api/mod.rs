use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::{
    TourGuideError,
    catalog::{self, PlaceRepository},
    geo::{self, NearbyPlace},
    lookup::{GeocodeResult, Hotel, NominatimClient, OverpassClient},
    models::{Coordinate, Place, QueryCriteria},
    routing::{Preference, Route, RouteService, TransportMode},
    session::DEFAULT_RADIUS_KM,
};

/// Shared, read-only handles used by every handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn PlaceRepository>,
    pub routes: Arc<RouteService>,
    pub geocoder: Arc<NominatimClient>,
    pub hotels: Arc<OverpassClient>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/places", get(get_places))
        .route("/places/seasons", get(get_seasons))
        .route("/places/states", get(get_states))
        .route("/places/nearby", get(get_nearby_places))
        .route("/places/{id}/hotels", get(get_place_hotels))
        .route("/route", get(get_route))
        .route("/geocode", get(get_geocode))
        .with_state(state)
}

impl IntoResponse for TourGuideError {
    fn into_response(self) -> Response {
        let status = match &self {
            TourGuideError::Validation { .. } => StatusCode::BAD_REQUEST,
            TourGuideError::NotFound { .. } => StatusCode::NOT_FOUND,
            TourGuideError::Upstream { .. } | TourGuideError::RouteUnavailable { .. } => {
                StatusCode::BAD_GATEWAY
            }
            TourGuideError::Unsupported { .. } => StatusCode::NOT_IMPLEMENTED,
            TourGuideError::Config { .. } | TourGuideError::Io { .. } => {
                error!("Request failed: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = json!({
            "error": self.to_string(),
            "message": self.user_message(),
        });
        (status, Json(body)).into_response()
    }
}

async fn get_places(
    State(state): State<AppState>,
    Query(criteria): Query<QueryCriteria>,
) -> Json<Vec<Place>> {
    Json(catalog::query(state.catalog.as_ref(), &criteria))
}

async fn get_seasons(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(catalog::seasons(state.catalog.as_ref()))
}

async fn get_states(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(catalog::states(state.catalog.as_ref()))
}

#[derive(Debug, Deserialize)]
struct NearbyParams {
    lat: f64,
    lon: f64,
    radius_km: Option<f64>,
    season: Option<String>,
    state: Option<String>,
    search: Option<String>,
}

async fn get_nearby_places(
    State(state): State<AppState>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<Vec<NearbyPlace>>, TourGuideError> {
    let origin = Coordinate::new(params.lat, params.lon);
    if !origin.is_valid() {
        return Err(TourGuideError::validation(
            "lat must be within [-90, 90] and lon within [-180, 180]",
        ));
    }

    let radius_km = params.radius_km.unwrap_or(f64::from(DEFAULT_RADIUS_KM));
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(TourGuideError::validation(
            "radius_km must be a non-negative number",
        ));
    }

    let criteria = QueryCriteria {
        season: params.season,
        state: params.state,
        search: params.search,
    };
    let places = catalog::query(state.catalog.as_ref(), &criteria);
    Ok(Json(geo::nearby(origin, radius_km, &places)))
}

async fn get_place_hotels(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Vec<Hotel>>, TourGuideError> {
    let place = state
        .catalog
        .find(id)
        .ok_or_else(|| TourGuideError::not_found(format!("No place with id {id}")))?;

    let hotels = state.hotels.hotels_near(place.coordinate()).await?;
    Ok(Json(hotels))
}

#[derive(Debug, Deserialize)]
struct RouteParams {
    from_lat: f64,
    from_lon: f64,
    to_lat: f64,
    to_lon: f64,
    mode: Option<String>,
    preference: Option<String>,
}

async fn get_route(
    State(state): State<AppState>,
    Query(params): Query<RouteParams>,
) -> Result<Json<Route>, TourGuideError> {
    let mode = match params.mode.as_deref().filter(|m| !m.is_empty()) {
        Some(mode) => mode.parse()?,
        None => TransportMode::default(),
    };
    let preference = match params.preference.as_deref().filter(|p| !p.is_empty()) {
        Some(preference) => preference.parse()?,
        None => Preference::default(),
    };

    let route = state
        .routes
        .get_route(
            Coordinate::new(params.from_lat, params.from_lon),
            Coordinate::new(params.to_lat, params.to_lon),
            mode,
            preference,
        )
        .await?;
    Ok(Json(route))
}

#[derive(Debug, Deserialize)]
struct GeocodeParams {
    q: String,
}

#[derive(Debug, Serialize)]
struct GeocodeResponse {
    results: Vec<GeocodeResult>,
    /// Informational text when nothing was found
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

async fn get_geocode(
    State(state): State<AppState>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<GeocodeResponse>, TourGuideError> {
    let results = state.geocoder.search(&params.q).await?;
    let message = crate::session::geocode_message(params.q.trim(), &results);
    Ok(Json(GeocodeResponse { results, message }))
}
