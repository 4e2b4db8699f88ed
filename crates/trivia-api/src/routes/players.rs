//! Routes for the Player Directory.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use trivia_core::player::Player;
use trivia_player::application::{command_handlers, query_handlers};
use trivia_player::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct GetOrCreatePlayerRequest {
    /// Player name, 1 to 40 characters.
    pub name: String,
}

/// Response body for POST /.
#[derive(Debug, Serialize)]
pub struct PlayerResponse {
    /// The player's id.
    pub player_id: Uuid,
    /// Whether this request registered the player.
    pub created: bool,
}

/// POST /
#[instrument(skip(state, request))]
async fn get_or_create_player(
    State(state): State<AppState>,
    Json(request): Json<GetOrCreatePlayerRequest>,
) -> Result<Json<PlayerResponse>, ApiError> {
    let command = commands::GetOrCreatePlayer {
        correlation_id: Uuid::new_v4(),
        name: request.name,
    };

    info!(correlation_id = %command.correlation_id, "handling get_or_create_player command");

    let result = command_handlers::handle_get_or_create_player(
        &command,
        state.clock.as_ref(),
        &*state.players,
    )
    .await?;

    Ok(Json(PlayerResponse {
        player_id: result.player_id,
        created: result.created,
    }))
}

/// GET /{player_id}
#[instrument(skip(state))]
async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<Uuid>,
) -> Result<Json<Player>, ApiError> {
    let player = query_handlers::get_player_by_id(player_id, &*state.players).await?;
    Ok(Json(player))
}

/// Returns the router for the player directory.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(get_or_create_player))
        .route("/{player_id}", get(get_player))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;
    use trivia_core::clock::Clock;
    use trivia_core::rng::DeterministicRng;
    use trivia_game::domain::scoring::GameSettings;
    use trivia_test_support::{FailingStore, FixedClock, InMemoryStore, MockRng, StubQuestionBank};

    fn app_state_with_store(store: Arc<InMemoryStore>) -> AppState {
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(FixedClock::standard());
        let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(MockRng));
        AppState::new(
            clock,
            rng,
            store.clone(),
            store.clone(),
            store,
            Arc::new(StubQuestionBank::new()),
            GameSettings::default(),
        )
    }

    fn failing_app_state() -> AppState {
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(FixedClock::standard());
        let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(MockRng));
        let store = Arc::new(FailingStore);
        AppState::new(
            clock,
            rng,
            store.clone(),
            store.clone(),
            store,
            Arc::new(StubQuestionBank::new()),
            GameSettings::default(),
        )
    }

    fn post_name(name: &str) -> Request<Body> {
        let body = serde_json::json!({ "name": name });
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    async fn json_of(response: axum::response::Response) -> Value {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    #[tokio::test]
    async fn test_get_or_create_returns_same_id_for_same_name() {
        // Arrange
        let store = Arc::new(InMemoryStore::new());
        let app = router().with_state(app_state_with_store(store.clone()));

        // Act
        let first = app.clone().oneshot(post_name("helenvu")).await.unwrap();
        let second = app.oneshot(post_name("helenvu")).await.unwrap();

        // Assert
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(second.status(), StatusCode::OK);
        let first = json_of(first).await;
        let second = json_of(second).await;
        assert_eq!(first["player_id"], second["player_id"]);
        assert_eq!(first["created"], true);
        assert_eq!(second["created"], false);
        assert_eq!(store.players().len(), 1);
    }

    #[tokio::test]
    async fn test_get_or_create_returns_400_for_overlong_name() {
        let store = Arc::new(InMemoryStore::new());
        let app = router().with_state(app_state_with_store(store.clone()));

        let response = app.oneshot(post_name(&"x".repeat(41))).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_of(response).await["error"], "invalid_input");
        assert!(store.players().is_empty());
    }

    #[tokio::test]
    async fn test_get_or_create_returns_500_when_store_fails() {
        let app = router().with_state(failing_app_state());

        let response = app.oneshot(post_name("paul")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_of(response).await["error"], "storage_failure");
    }

    #[tokio::test]
    async fn test_get_player_returns_404_for_unknown_id() {
        let app = router().with_state(app_state_with_store(Arc::new(InMemoryStore::new())));

        let request = Request::builder()
            .method("GET")
            .uri(format!("/{}", Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
