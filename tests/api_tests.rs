//! HTTP API tests against the embedded catalog

mod common;

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use tourguide::web;

fn app() -> Router {
    let routing = common::routing_config(common::UNREACHABLE, common::UNREACHABLE, None);
    web::app(common::state(routing, common::UNREACHABLE), None)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn ids(body: &Value) -> Vec<u64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|place| place["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_root_banner() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Tourist Guide Platform API");
}

#[tokio::test]
async fn test_all_places() {
    let (status, body) = get_json(app(), "/api/places").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 17);
    assert_eq!(body[0]["name"], "Elephant Falls");
    assert_eq!(body[0]["image"], "https://images.unsplash.com/photo-1464983953574-0892a716854b");
}

#[tokio::test]
async fn test_winter_includes_year_round_places() {
    let (_, body) = get_json(app(), "/api/places?season=winter").await;
    let places = body.as_array().unwrap();
    assert!(!places.is_empty());
    assert!(
        places
            .iter()
            .all(|p| p["season"] == "winter" || p["season"] == "all")
    );

    let (_, all) = get_json(app(), "/api/places").await;
    let expected = all
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["season"] == "winter" || p["season"] == "all")
        .count();
    assert_eq!(places.len(), expected);
}

#[tokio::test]
async fn test_empty_params_are_ignored() {
    let (_, body) = get_json(app(), "/api/places?season=&state=&search=").await;
    assert_eq!(body.as_array().unwrap().len(), 17);
}

#[tokio::test]
async fn test_state_filter_case_insensitive() {
    let (_, upper) = get_json(app(), "/api/places?state=Meghalaya").await;
    let (_, lower) = get_json(app(), "/api/places?state=meghalaya").await;
    assert_eq!(upper, lower);
    assert_eq!(upper.as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_search_without_match() {
    let (status, body) = get_json(app(), "/api/places?search=xyz-no-match").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_search_falls_back_to_region() {
    // Nothing in Assam mentions Khasi, so the search widens to every place
    // whose district contains it.
    let (_, body) = get_json(app(), "/api/places?state=Assam&search=khasi").await;
    assert_eq!(ids(&body), vec![1, 3, 4, 5, 6, 7, 9, 10, 11, 12]);
}

#[tokio::test]
async fn test_search_matches_description() {
    let (_, body) = get_json(app(), "/api/places?search=guwahati").await;
    assert_eq!(ids(&body), vec![29]);
}

#[tokio::test]
async fn test_seasons_and_states() {
    let (_, seasons) = get_json(app(), "/api/places/seasons").await;
    assert_eq!(seasons, json!(["all", "monsoon", "winter"]));

    let (_, states) = get_json(app(), "/api/places/states").await;
    assert_eq!(states, json!(["Assam", "Meghalaya"]));
}

#[tokio::test]
async fn test_nearby_zero_radius_includes_origin() {
    let (status, body) = get_json(
        app(),
        "/api/places/nearby?lat=25.5562&lon=91.8221&radius_km=0",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1]);
    assert_eq!(body[0]["distance_km"], 0.0);
    assert_eq!(body[0]["name"], "Elephant Falls");
}

#[tokio::test]
async fn test_nearby_sorted_and_filtered() {
    let (_, body) = get_json(
        app(),
        "/api/places/nearby?lat=26.1854&lon=91.7556&radius_km=10&season=winter",
    )
    .await;
    let distances: Vec<f64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["distance_km"].as_f64().unwrap())
        .collect();
    assert!(!distances.is_empty());
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    assert!(distances.iter().all(|d| *d <= 10.0));
    assert!(
        body.as_array()
            .unwrap()
            .iter()
            .all(|p| p["state"] == "Assam")
    );
}

#[tokio::test]
async fn test_nearby_rejects_bad_input() {
    let (status, _) = get_json(app(), "/api/places/nearby?lat=95&lon=91.8").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(app(), "/api/places/nearby?lat=25.5&lon=91.8&radius_km=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(app(), "/api/places/nearby?lat=north&lon=91.8").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_hotels_for_unknown_place() {
    let (status, body) = get_json(app(), "/api/places/999/hotels").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn test_hotels_upstream_down() {
    let (status, body) = get_json(app(), "/api/places/1/hotels").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["message"].as_str().unwrap().contains("Overpass"));
}

#[tokio::test]
async fn test_route_rejects_unknown_mode() {
    let (status, body) = get_json(
        app(),
        "/api/route?from_lat=25.5&from_lon=91.8&to_lat=26.1&to_lon=91.7&mode=boat",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("boat"));
}

#[tokio::test]
async fn test_route_unavailable_is_bad_gateway() {
    let (status, body) = get_json(
        app(),
        "/api/route?from_lat=25.5&from_lon=91.8&to_lat=26.1&to_lon=91.7",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Route unavailable")
    );
}

#[tokio::test]
async fn test_hotels_and_geocode_through_mock_services() {
    let overpass = Router::new()
        .route(
            "/api/interpreter",
            post(|| async {
                Json(json!({"elements": [
                    {"type": "node", "id": 11, "lat": 25.57, "lon": 91.88,
                     "tags": {"name": "Hotel Polo Towers", "tourism": "hotel"}}
                ]}))
            }),
        )
        .route(
            "/search",
            get(|| async {
                Json(json!([
                    {"place_id": 5, "lat": "25.5788", "lon": "91.8933", "display_name": "Shillong, Meghalaya, India"}
                ]))
            }),
        );
    let base = common::spawn(overpass).await;

    let routing = common::routing_config(common::UNREACHABLE, common::UNREACHABLE, None);
    let app = web::app(common::state(routing, &base), None);

    let (status, hotels) = get_json(app.clone(), "/api/places/11/hotels").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hotels[0]["name"], "Hotel Polo Towers");
    assert_eq!(hotels[0]["kind"], "hotel");

    let (status, geocoded) = get_json(app, "/api/geocode?q=Shillong").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(geocoded["results"][0]["latitude"], 25.5788);
    assert!(geocoded.get("message").is_none());
}

#[tokio::test]
async fn test_geocode_without_results_has_message() {
    let nominatim = Router::new().route("/search", get(|| async { Json(json!([])) }));
    let base = common::spawn(nominatim).await;

    let routing = common::routing_config(common::UNREACHABLE, common::UNREACHABLE, None);
    let app = web::app(common::state(routing, &base), None);

    let (status, body) = get_json(app, "/api/geocode?q=Atlantis").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], json!([]));
    assert_eq!(body["message"], "Location \"Atlantis\" not found");
}
