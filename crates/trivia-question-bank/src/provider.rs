//! Raw provider abstraction.

use async_trait::async_trait;
use serde::Deserialize;
use trivia_core::error::DomainError;
use trivia_core::question::Difficulty;

/// Provider status for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    /// Results were returned.
    Success,
    /// The provider has no questions matching the query.
    NoResults,
    /// The query was malformed.
    InvalidParameter,
    /// The session token does not exist.
    TokenNotFound,
    /// The session token has exhausted every question.
    TokenEmpty,
    /// Too many requests; retry after the cool-down.
    RateLimited,
    /// A code this adapter does not know.
    Unknown(u8),
}

impl From<u8> for ResponseCode {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::Success,
            1 => Self::NoResults,
            2 => Self::InvalidParameter,
            3 => Self::TokenNotFound,
            4 => Self::TokenEmpty,
            5 => Self::RateLimited,
            other => Self::Unknown(other),
        }
    }
}

/// A question exactly as the provider sent it; text may be HTML-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawQuestion {
    /// Provider category.
    #[serde(default)]
    pub category: String,
    /// Question text.
    pub question: String,
    /// Correct answer.
    pub correct_answer: String,
    /// Incorrect answers.
    pub incorrect_answers: Vec<String>,
}

/// Status plus records for one provider request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    /// Provider status.
    pub code: ResponseCode,
    /// Records, empty unless `code` is `Success`.
    pub results: Vec<RawQuestion>,
}

impl ProviderResponse {
    /// A rate-limit signal with no records.
    #[must_use]
    pub fn rate_limited() -> Self {
        Self {
            code: ResponseCode::RateLimited,
            results: Vec::new(),
        }
    }
}

/// One outbound request to an external trivia source.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Requests `amount` multiple-choice questions of `difficulty`.
    ///
    /// # Errors
    ///
    /// `DomainError::ProviderUnavailable` for transport failures and
    /// unreadable responses. Provider-level statuses, rate limiting
    /// included, are reported through [`ProviderResponse::code`].
    async fn request(
        &self,
        difficulty: Difficulty,
        amount: u32,
    ) -> Result<ProviderResponse, DomainError>;
}
