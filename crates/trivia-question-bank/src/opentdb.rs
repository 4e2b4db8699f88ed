//! Open Trivia DB provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use trivia_core::error::DomainError;
use trivia_core::question::Difficulty;

use crate::provider::{ProviderResponse, QuestionProvider, RawQuestion};

/// Public Open Trivia DB endpoint.
pub const DEFAULT_BASE_URL: &str = "https://opentdb.com/api.php";

/// JSON body returned by `api.php`.
#[derive(Debug, Deserialize)]
struct ApiBody {
    response_code: u8,
    #[serde(default)]
    results: Vec<RawQuestion>,
}

impl From<ApiBody> for ProviderResponse {
    fn from(body: ApiBody) -> Self {
        Self {
            code: body.response_code.into(),
            results: body.results,
        }
    }
}

/// HTTP client for Open Trivia DB.
#[derive(Debug, Clone)]
pub struct OpenTdbClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenTdbClient {
    /// Creates a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ProviderUnavailable` if the HTTP client cannot
    /// be built (e.g. TLS backend initialization failure).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::ProviderUnavailable(format!("http client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Creates a client around an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl QuestionProvider for OpenTdbClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn request(
        &self,
        difficulty: Difficulty,
        amount: u32,
    ) -> Result<ProviderResponse, DomainError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("amount", amount.to_string()),
                ("difficulty", difficulty.as_str().to_owned()),
                ("type", "multiple".to_owned()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "trivia provider request failed");
                DomainError::ProviderUnavailable(format!("request failed: {e}"))
            })?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Ok(ProviderResponse::rate_limited());
        }

        let response = response.error_for_status().map_err(|e| {
            warn!(error = %e, "trivia provider returned an error status");
            DomainError::ProviderUnavailable(format!("unexpected status: {e}"))
        })?;

        let body: ApiBody = response.json().await.map_err(|e| {
            DomainError::ProviderUnavailable(format!("unreadable response body: {e}"))
        })?;

        debug!(
            response_code = body.response_code,
            results = body.results.len(),
            "trivia provider responded"
        );
        Ok(body.into())
    }
}
