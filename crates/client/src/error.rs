//! Unified error handling.
//!
//! Provides a unified `AppError` composing the boundary errors. The
//! presentation layer renders `user_message()`; the full error chain
//! stays available for logging.

use thiserror::Error;

use crate::models::ValidationError;
use crate::remote::StoreError;
use crate::session::AuthError;

/// Application-level error type for the client core.
#[derive(Debug, Error)]
pub enum AppError {
    /// Client-side validation failed before any remote call.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Session operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Remote store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    /// The message the presentation layer should show.
    ///
    /// Transport and provider internals are not exposed to members.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid email or password".to_string(),
                AuthError::WeakCredential(policy) => policy.to_string(),
                AuthError::PasswordMismatch => "Passwords do not match".to_string(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                AuthError::NotAuthenticated => "Please login first".to_string(),
                AuthError::Provider(_) => "Sign-in failed, please try again".to_string(),
            },
            Self::Store(err) => match err {
                StoreError::NotFound(_) => "Not found".to_string(),
                StoreError::Forbidden(_) => "You can only change your own reviews".to_string(),
                StoreError::DuplicateFavorite(_) => "Already in your favorites".to_string(),
                StoreError::Rejected(message) => message.clone(),
                StoreError::Transport(_) | StoreError::Parse(_) | StoreError::Unexpected { .. } => {
                    "Something went wrong, please try again".to_string()
                }
            },
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
