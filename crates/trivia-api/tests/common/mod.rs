//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use trivia_core::clock::Clock;
use trivia_core::rng::DeterministicRng;
use trivia_game::domain::scoring::GameSettings;
use trivia_store::{PgGameRepository, PgPlayerRepository, PgQuestionStore};
use trivia_test_support::{FixedClock, MockRng, StubQuestionBank};

use trivia_api::routes;
use trivia_api::state::AppState;

/// Build the full app router over the PostgreSQL stores, with a canned
/// question bank and a deterministic clock and RNG. Uses the same route
/// structure as `main.rs`.
pub fn build_test_app(pool: PgPool, bank: StubQuestionBank) -> Router {
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(FixedClock::standard());
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(MockRng));
    let app_state = AppState::new(
        clock,
        rng,
        Arc::new(PgPlayerRepository::new(pool.clone())),
        Arc::new(PgGameRepository::new(pool.clone())),
        Arc::new(PgQuestionStore::new(pool)),
        Arc::new(bank),
        GameSettings::default(),
    );

    routes::router().with_state(app_state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
