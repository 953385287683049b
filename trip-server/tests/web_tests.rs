//! End-to-end tests of the HTTP surface.
//!
//! The router is served on an ephemeral port with the offline fixtures from
//! `data/mock`, and driven over real HTTP.

use std::path::PathBuf;

use serde_json::{Value, json};
use tokio::net::TcpListener;

use trip_server::geocode::MockGeocoder;
use trip_server::planner::ResolverConfig;
use trip_server::routing::MockRouteProvider;
use trip_server::web::{AppState, create_router};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/mock")
}

/// Start a server on a free port and return its base URL.
async fn spawn_app(config: ResolverConfig) -> String {
    let dir = fixture_dir();
    let state = AppState::new(
        MockGeocoder::load(dir.join("places.json")).unwrap(),
        MockRouteProvider::load(dir.join("routes.json")).unwrap(),
        config,
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });

    format!("http://{addr}")
}

async fn plan(base: &str, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("{base}/trip/plan"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn health() {
    let base = spawn_app(ResolverConfig::default()).await;
    let body = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn round_trip_through_three_stops() {
    let base = spawn_app(ResolverConfig::default()).await;

    let (status, body) = plan(
        &base,
        json!({ "stops": [
            { "address": "Chycherina vulytsya" },
            { "address": "Kanatna vulytsya" },
            { "address": "Derybasivska vulytsya" }
        ]}),
    )
    .await;

    assert_eq!(status, 200, "{body}");
    let legs = body["legs"].as_array().unwrap();
    assert_eq!(legs.len(), 3);
    assert_eq!(legs[0]["from"], "Chycherina vulytsya");
    assert_eq!(legs[0]["to"], "Kanatna vulytsya");
    // Fastest of the two alternatives, not the shortest
    assert_eq!(legs[0]["travel_time_s"], 540);
    assert_eq!(legs[0]["distance_m"], 3500.0);
    assert_eq!(legs[2]["to"], "Chycherina vulytsya");

    assert_eq!(body["summary"]["distance_km"], 8);
    assert_eq!(body["summary"]["total_time_s"], 1440);
    assert_eq!(
        body["summary"]["description"],
        "Total Distance: 8 km Total Time: 24 min"
    );
}

#[tokio::test]
async fn one_way_override_and_located_source() {
    let base = spawn_app(ResolverConfig::default()).await;

    let (status, body) = plan(
        &base,
        json!({
            "stops": [
                { "label": "Home", "lat": 46.4775, "lon": 30.7326 },
                { "label": "Port", "address": "Kanatna vulytsya" },
                null
            ],
            "round_trip": false
        }),
    )
    .await;

    assert_eq!(status, 200, "{body}");
    let legs = body["legs"].as_array().unwrap();
    assert_eq!(legs.len(), 1);
    assert_eq!(legs[0]["from"], "Home");
    assert_eq!(legs[0]["to"], "Port");
    assert_eq!(body["summary"]["total_time"], "9 min");
}

#[tokio::test]
async fn missing_destination_is_bad_request() {
    let base = spawn_app(ResolverConfig::default()).await;

    let (status, body) = plan(
        &base,
        json!({ "stops": [{ "address": "Chycherina vulytsya" }, null, null] }),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Enter a source and at least one destination.");
}

#[tokio::test]
async fn unroutable_leg_is_bad_gateway() {
    let base = spawn_app(ResolverConfig::default()).await;

    let (status, body) = plan(
        &base,
        json!({
            "stops": [{ "address": "Chycherina vulytsya" }, { "address": "Arkadia" }],
            "round_trip": false
        }),
    )
    .await;

    assert_eq!(status, 502);
    assert_eq!(body["error"], "Directions not available.");
}

#[tokio::test]
async fn unknown_address_is_not_found() {
    let base = spawn_app(ResolverConfig::default()).await;

    let (status, _) = plan(
        &base,
        json!({ "stops": [{ "address": "Chycherina vulytsya" }, { "address": "Atlantis" }] }),
    )
    .await;

    assert_eq!(status, 404);
}

#[tokio::test]
async fn too_many_stops_is_bad_request() {
    let base = spawn_app(ResolverConfig::default()).await;

    let stops: Vec<Value> = (0..4)
        .map(|_| json!({ "address": "Kanatna vulytsya" }))
        .collect();
    let (status, body) = plan(&base, json!({ "stops": stops, "round_trip": false })).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "At most 3 stops are allowed, got 4");
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let base = spawn_app(ResolverConfig::default()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/trip/plan"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn geocode_returns_candidates() {
    let base = spawn_app(ResolverConfig::default()).await;

    let body: Value = reqwest::get(format!("{base}/geocode?q=kanatna%20vulytsya&limit=1"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let places = body["places"].as_array().unwrap();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0]["name"], "Kanatna St, Prymorskyi District, Odesa");
}

#[tokio::test]
async fn geocode_unknown_address_is_not_found() {
    let base = spawn_app(ResolverConfig::default()).await;

    let response = reqwest::get(format!("{base}/geocode?q=Atlantis"))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn reverse_finds_nearest_place() {
    let base = spawn_app(ResolverConfig::default()).await;

    let response = reqwest::get(format!("{base}/reverse?lat=46.4845&lon=30.7379"))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["name"], "Derybasivska St, Prymorskyi District, Odesa");
}

#[tokio::test]
async fn reverse_rejects_invalid_coordinate() {
    let base = spawn_app(ResolverConfig::default()).await;

    let response = reqwest::get(format!("{base}/reverse?lat=120&lon=0"))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}
