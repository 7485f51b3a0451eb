//! Business logic between the routes and the backend repository.
//!
//! Services validate input before any backend call, check the signed-in
//! user's capabilities and translate repository failures into the outcomes
//! routes branch on.

use thiserror::Error;

use crate::domain::auth::{Screen, SessionUser};
use crate::forms::FormError;
use crate::listing::ListState;
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod auth;
pub mod book_day;
pub mod entries;
pub mod home;
pub mod productivity;
pub mod records;

/// Generic notification for failed writes.
pub const SAVE_FAILED_MESSAGE: &str = "Erro ao salvar os dados.";

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The user lacks the capability the screen requires.
    #[error("unauthorized")]
    Unauthorized,

    /// The backend no longer accepts the session token.
    #[error("session expired")]
    SessionExpired,

    #[error("not found")]
    NotFound,

    /// Submitted form failed validation; nothing was sent to the backend.
    #[error("{}", .0.message())]
    Invalid(#[from] FormError),

    /// Operation exists in the interface but the backend offers no support yet.
    #[error("{0}")]
    Unsupported(String),

    /// Message reported by the backend.
    #[error("{0}")]
    Backend(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::SessionExpired => ServiceError::SessionExpired,
            RepositoryError::Backend(message) => ServiceError::Backend(message),
            RepositoryError::ConnectionError(_)
            | RepositoryError::ValidationError(_)
            | RepositoryError::Unexpected(_) => ServiceError::Internal(err.to_string()),
        }
    }
}

impl ServiceError {
    /// Notification for a failed write: the backend message when one was
    /// reported, `fallback` otherwise.
    pub fn notification(&self, fallback: &str) -> String {
        match self {
            ServiceError::Invalid(err) => err.message(),
            ServiceError::Backend(message) if !message.trim().is_empty() => message.clone(),
            ServiceError::Unsupported(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Rejects users whose capabilities do not cover `screen`.
pub fn ensure_screen(user: &SessionUser, screen: Screen) -> ServiceResult<()> {
    match screen.required_capability() {
        Some(capability) if !user.capabilities().contains(capability) => {
            Err(ServiceError::Unauthorized)
        }
        _ => Ok(()),
    }
}

/// Applies a list fetch to `state`.
///
/// Failures only leave the previous records in place, except an expired
/// session which must still end the session.
pub(crate) fn load_list<T>(
    state: &mut ListState<T>,
    result: RepositoryResult<Vec<T>>,
) -> ServiceResult<()> {
    match result {
        Err(RepositoryError::SessionExpired) => Err(ServiceError::SessionExpired),
        other => {
            state.finish(other);
            Ok(())
        }
    }
}
