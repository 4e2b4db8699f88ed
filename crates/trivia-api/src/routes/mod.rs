//! Route modules, one per component.

pub mod games;
pub mod health;
pub mod players;

use axum::Router;

use crate::state::AppState;

/// The full API surface, before state and middleware are attached.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/players", players::router())
        .nest("/api/v1/games", games::router())
}
