use tracing::error;
use trivia_core::error::DomainError;

/// Logs a database failure and converts it into a storage error.
pub(crate) fn storage(e: sqlx::Error) -> DomainError {
    error!(error = %e, "database operation failed");
    DomainError::Storage(e.to_string())
}
