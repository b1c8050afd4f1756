use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use std::sync::Arc;
use tourplanner::cache::{ItineraryCache, MemoryCacheService};
use tower::ServiceExt;

mod common;

use common::{body_json, paris_itinerary, StubCompletion};

async fn app() -> axum::Router {
    common::setup_test_app(StubCompletion::replying("{}")).await
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let cache: Arc<dyn ItineraryCache> = Arc::new(MemoryCacheService::new(60, 10));
    let state = common::setup_test_state(StubCompletion::replying("{}"), Some(cache)).await;
    let app = tourplanner::routes::create_router(state);

    let response = app.oneshot(get("/debug/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["checks"]["database"]["backend"], "sqlite");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["backend"], "memory");
}

#[tokio::test]
async fn test_health_check_without_cache() {
    let response = app().await.oneshot(get("/debug/health")).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json["checks"]["cache"], "disabled");
}

#[tokio::test]
async fn test_vehicle_listing_filters() {
    let app = app().await;

    let response = app.clone().oneshot(get("/vehicles")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 4);

    let response = app
        .clone()
        .oneshot(get("/vehicles?type=car&maxPrice=2000"))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["name"], "Honda City");

    let response = app
        .clone()
        .oneshot(get("/vehicles?search=enfield&type=all"))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json[0]["type"], "bike");

    let response = app.oneshot(get("/vehicles?type=spaceship")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refill_station_search() {
    let app = app().await;

    let response = app.clone().oneshot(get("/refill-stations")).await.unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 5);

    let response = app
        .oneshot(get("/refill-stations?search=museum"))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["name"], "Albert Hall Museum Station");
    assert_eq!(json[0]["location"], json!([26.9117, 75.8183]));
}

#[tokio::test]
async fn test_pricing_cycles() {
    let app = app().await;

    let response = app.clone().oneshot(get("/pricing")).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json[1]["price"], 29.0);
    assert_eq!(json[1]["billingCycle"], "monthly");

    let response = app.clone().oneshot(get("/pricing?cycle=yearly")).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json[1]["price"], 278.4);
    assert_eq!(json[1]["savings"], 69.6);

    let response = app.oneshot(get("/pricing?cycle=weekly")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reverse_geocode() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(get("/geocode/reverse?lat=26.9124&lng=75.7873"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["label"], "Jaipur");
    assert_eq!(json["coordinates"], json!([26.9124, 75.7873]));

    let response = app
        .oneshot(get("/geocode/reverse?lat=120&lng=75.7873"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_map_view_endpoint() {
    let itinerary = paris_itinerary();
    let app = app().await;

    let response = app
        .clone()
        .oneshot(post_json("/tours/map", json!({ "itinerary": itinerary })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["zoom"], 13);
    assert_eq!(json["markers"].as_array().unwrap().len(), 3);
    assert_eq!(json["markers"][0]["order"], 1);
    assert_eq!(json["markers"][2]["meal"], "lunch");
    assert_eq!(json["polyline"].as_array().unwrap().len(), 3);
    assert_eq!(json["geojson"]["type"], "FeatureCollection");
    // Three stops plus the route line
    assert_eq!(json["geojson"]["features"].as_array().unwrap().len(), 4);

    let response = app
        .clone()
        .oneshot(post_json(
            "/tours/map",
            json!({ "itinerary": itinerary, "focusPlaceId": "louvre" }),
        ))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["zoom"], 16);
    assert_eq!(json["center"], json!([48.8606, 2.3376]));

    let response = app
        .oneshot(post_json(
            "/tours/map",
            json!({ "itinerary": itinerary, "focusPlaceId": "sacre-coeur" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_narration_endpoint() {
    let itinerary = paris_itinerary();
    let app = app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/tours/narration",
            json!({ "itinerary": itinerary, "placeId": "eiffel-tower" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["text"].as_str().unwrap().starts_with("Welcome to Eiffel Tower!"));
    for chunk in json["chunks"].as_array().unwrap() {
        assert!(chunk.as_str().unwrap().chars().count() <= 200);
    }

    let response = app
        .clone()
        .oneshot(post_json("/tours/narration", json!({ "itinerary": itinerary })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.get("placeId").is_none());

    let response = app
        .oneshot(post_json(
            "/tours/narration",
            json!({ "itinerary": itinerary, "placeId": "sacre-coeur" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
