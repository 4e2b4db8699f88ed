//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use trivia_game::domain::scoring::{DEFAULT_QUESTIONS_PER_TIER, GameSettings, ScoringPolicy};
use trivia_question_bank::PacingPolicy;
use trivia_question_bank::bank::MAX_BATCH_SIZE;
use trivia_question_bank::opentdb::DEFAULT_BASE_URL;
use trivia_question_bank::pacing::DEFAULT_COOLDOWN;

use crate::error::AppError;

/// Everything the server needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Upper bound on pooled database connections.
    pub database_max_connections: u32,
    /// Open Trivia DB endpoint.
    pub trivia_api_url: String,
    /// Timeout for a single provider request.
    pub http_timeout: Duration,
    /// Pacing applied to provider requests.
    pub pacing: PacingPolicy,
    /// Engine settings.
    pub settings: GameSettings,
    /// Browser origins allowed by CORS. Empty means any origin.
    pub cors_allowed_origins: Vec<HeaderValue>,
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or any value
    /// fails to parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of
    /// a variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or any value
    /// fails to parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| {
            AppError::Config("DATABASE_URL environment variable must be set".to_owned())
        })?;

        let questions_per_tier = parse_or(&lookup, "QUESTIONS_PER_TIER", DEFAULT_QUESTIONS_PER_TIER)?;
        if !(1..=MAX_BATCH_SIZE).contains(&questions_per_tier) {
            return Err(AppError::Config(format!(
                "QUESTIONS_PER_TIER must be between 1 and {MAX_BATCH_SIZE}, got {questions_per_tier}"
            )));
        }

        let scoring = match lookup("SCORING_POLICY") {
            Some(raw) => raw
                .parse::<ScoringPolicy>()
                .map_err(|e| AppError::Config(format!("SCORING_POLICY: {e}")))?,
            None => ScoringPolicy::default(),
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| {
                    AppError::Config(format!("CORS_ALLOWED_ORIGINS has invalid origin {origin:?}: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: parse_or(&lookup, "PORT", 3000)?,
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            trivia_api_url: lookup("TRIVIA_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            http_timeout: Duration::from_secs(parse_or(&lookup, "TRIVIA_HTTP_TIMEOUT_SECS", 10)?),
            pacing: PacingPolicy {
                cooldown: Duration::from_secs(parse_or(
                    &lookup,
                    "PROVIDER_COOLDOWN_SECS",
                    DEFAULT_COOLDOWN.as_secs(),
                )?),
                rate_limit_retries: parse_or(&lookup, "PROVIDER_RATE_LIMIT_RETRIES", 1)?,
            },
            settings: GameSettings {
                questions_per_tier,
                scoring,
            },
            cors_allowed_origins,
        })
    }

    /// CORS policy for the HTTP surface: the configured origins with the
    /// methods and headers the API uses, or any origin when none are set.
    #[must_use]
    pub fn cors_layer(&self) -> CorsLayer {
        if self.cors_allowed_origins.is_empty() {
            return CorsLayer::permissive();
        }
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.cors_allowed_origins.clone()))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a valid address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| AppError::Config(format!("{key} is invalid ({raw:?}): {e}"))),
        None => Ok(default),
    }
}
