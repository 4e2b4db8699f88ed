//! Trivia API server entry point.

use std::sync::{Arc, Mutex};

use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use trivia_core::clock::{Clock, SystemClock};
use trivia_core::rng::{DeterministicRng, SystemRng};
use trivia_question_bank::{OpenTdbClient, PacedQuestionBank};
use trivia_store::{PgGameRepository, PgPlayerRepository, PgQuestionStore};

use trivia_api::config::AppConfig;
use trivia_api::error::AppError;
use trivia_api::routes;
use trivia_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting trivia API server");

    let config = AppConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    let provider = OpenTdbClient::new(config.trivia_api_url.clone(), config.http_timeout)
        .map_err(AppError::Provider)?;
    let question_bank = Arc::new(PacedQuestionBank::new(provider, config.pacing));

    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(SystemClock);
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> =
        Arc::new(Mutex::new(SystemRng::from_entropy()));
    let app_state = AppState::new(
        clock,
        rng,
        Arc::new(PgPlayerRepository::new(pool.clone())),
        Arc::new(PgGameRepository::new(pool.clone())),
        Arc::new(PgQuestionStore::new(pool)),
        question_bank,
        config.settings,
    );

    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(config.cors_layer())
        .with_state(app_state);

    let addr = config.bind_addr()?;
    tracing::info!(
        %addr,
        questions_per_tier = config.settings.questions_per_tier,
        cors_origins = config.cors_allowed_origins.len(),
        "Listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
