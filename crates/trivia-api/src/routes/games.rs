//! Routes for the Game Session Engine.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use trivia_core::game::Lifeline;
use trivia_game::application::query_handlers::{self, GameSummary};
use trivia_game::application::command_handlers;
use trivia_game::domain::commands;
use trivia_game::domain::lifelines::LifelineHint;
use trivia_game::domain::outcomes::{AnswerResult, NextQuestionOutcome};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct StartGameRequest {
    /// The player who owns the new game.
    pub player_id: Uuid,
}

/// Response body for POST /.
#[derive(Debug, Serialize)]
pub struct StartGameResponse {
    /// The new game.
    pub game_id: Uuid,
    /// Questions stored for the game.
    pub questions_stored: usize,
}

/// Response body for GET /{game_id}/score.
#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    /// The game.
    pub game_id: Uuid,
    /// Its current score.
    pub score: i64,
}

/// Request body for POST /{game_id}/answers.
#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    /// The question being answered.
    pub question_id: Uuid,
    /// The chosen answer, compared verbatim.
    pub answer: String,
}

/// Request body for the lifeline endpoints.
#[derive(Debug, Deserialize)]
pub struct LifelineRequest {
    /// The question the lifeline applies to.
    pub question_id: Uuid,
}

/// POST /
#[instrument(skip(state, request), fields(player_id = %request.player_id))]
async fn start_game(
    State(state): State<AppState>,
    Json(request): Json<StartGameRequest>,
) -> Result<Json<StartGameResponse>, ApiError> {
    let command = commands::StartGame {
        correlation_id: Uuid::new_v4(),
        player_id: request.player_id,
    };

    info!(correlation_id = %command.correlation_id, "handling start_game command");

    let started = command_handlers::handle_start_game(
        &command,
        &state.settings,
        state.clock.as_ref(),
        &*state.question_bank,
        &*state.players,
        &*state.games,
        &*state.questions,
    )
    .await?;

    Ok(Json(StartGameResponse {
        game_id: started.game_id,
        questions_stored: started.questions_stored,
    }))
}

/// GET /{game_id}
#[instrument(skip(state))]
async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameSummary>, ApiError> {
    let summary =
        query_handlers::get_game_summary(game_id, &*state.games, &*state.questions).await?;
    Ok(Json(summary))
}

/// GET /{game_id}/score
#[instrument(skip(state))]
async fn get_score(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let score = query_handlers::get_score(game_id, &*state.games).await?;
    Ok(Json(ScoreResponse { game_id, score }))
}

/// POST /{game_id}/next-question
#[instrument(skip(state))]
async fn next_question(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<NextQuestionOutcome>, ApiError> {
    let command = commands::NextQuestion {
        correlation_id: Uuid::new_v4(),
        game_id,
    };

    info!(correlation_id = %command.correlation_id, "handling next_question command");

    let outcome = command_handlers::handle_next_question(
        &command,
        state.clock.as_ref(),
        &state.rng,
        &*state.games,
        &*state.questions,
    )
    .await?;

    Ok(Json(outcome))
}

/// POST /{game_id}/answers
#[instrument(skip(state, request), fields(question_id = %request.question_id))]
async fn submit_answer(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<SubmitAnswerRequest>,
) -> Result<Json<AnswerResult>, ApiError> {
    let command = commands::SubmitAnswer {
        correlation_id: Uuid::new_v4(),
        game_id,
        question_id: request.question_id,
        answer: request.answer,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_answer command");

    let result = command_handlers::handle_submit_answer(
        &command,
        &state.settings,
        state.clock.as_ref(),
        &*state.games,
        &*state.questions,
    )
    .await?;

    Ok(Json(result))
}

async fn use_lifeline(
    state: &AppState,
    game_id: Uuid,
    question_id: Uuid,
    lifeline: Lifeline,
) -> Result<Json<LifelineHint>, ApiError> {
    let command = commands::UseLifeline {
        correlation_id: Uuid::new_v4(),
        game_id,
        question_id,
        lifeline,
    };

    info!(correlation_id = %command.correlation_id, %lifeline, "handling use_lifeline command");

    let hint = command_handlers::handle_use_lifeline(
        &command,
        &state.rng,
        &*state.games,
        &*state.questions,
    )
    .await?;

    Ok(Json(hint))
}

/// POST /{game_id}/lifelines/fifty-fifty
#[instrument(skip(state, request), fields(question_id = %request.question_id))]
async fn fifty_fifty(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<LifelineRequest>,
) -> Result<Json<LifelineHint>, ApiError> {
    use_lifeline(&state, game_id, request.question_id, Lifeline::FiftyFifty).await
}

/// POST /{game_id}/lifelines/phone-a-friend
#[instrument(skip(state, request), fields(question_id = %request.question_id))]
async fn phone_a_friend(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<LifelineRequest>,
) -> Result<Json<LifelineHint>, ApiError> {
    use_lifeline(&state, game_id, request.question_id, Lifeline::PhoneAFriend).await
}

/// Returns the router for games.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(start_game))
        .route("/{game_id}", get(get_game))
        .route("/{game_id}/score", get(get_score))
        .route("/{game_id}/next-question", post(next_question))
        .route("/{game_id}/answers", post(submit_answer))
        .route("/{game_id}/lifelines/fifty-fifty", post(fifty_fifty))
        .route("/{game_id}/lifelines/phone-a-friend", post(phone_a_friend))
}
