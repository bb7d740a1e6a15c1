//! Session error types.

use thiserror::Error;

use foodiefinds_core::{EmailError, PasswordError};

use crate::identity::ProviderError;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password failed the sign-up policy.
    #[error("password validation failed: {0}")]
    WeakCredential(#[from] PasswordError),

    /// Confirmation value differs from the password.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Wrong email/password combination.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The identity provider rejected or failed the request.
    #[error("identity provider error: {0}")]
    Provider(String),

    /// No session is established.
    #[error("not signed in")]
    NotAuthenticated,
}

impl From<ProviderError> for AuthError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::InvalidCredentials => Self::InvalidCredentials,
            ProviderError::Rejected(message) | ProviderError::Unavailable(message) => {
                Self::Provider(message)
            }
        }
    }
}
