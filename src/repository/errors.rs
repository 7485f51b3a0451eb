use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    /// The backend rejected the bearer token.
    #[error("Session expired")]
    SessionExpired,

    /// Message reported by the backend for a failed request.
    #[error("{0}")]
    Backend(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Unexpected(format!("Malformed backend payload: {err}"))
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            RepositoryError::ValidationError(format!("Invalid request: {err}"))
        } else if err.is_decode() {
            RepositoryError::Unexpected(format!("Malformed backend payload: {err}"))
        } else {
            RepositoryError::ConnectionError(err.to_string())
        }
    }
}
