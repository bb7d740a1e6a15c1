//! Identity provider contract and the HTTP implementation.
//!
//! Credential verification and token issuance live in an external
//! provider; the core only depends on this trait. The wire format is the
//! provider's business - swap in any implementation that honors the
//! contract.

mod http;

pub use http::HttpIdentityProvider;

use async_trait::async_trait;
use thiserror::Error;

use foodiefinds_core::{Email, Password};

use crate::models::Identity;

/// Errors the identity provider can answer with.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Wrong email/password combination.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The provider refused the request (e.g., email already registered).
    #[error("identity provider rejected the request: {0}")]
    Rejected(String),

    /// The provider could not be reached or answered garbage.
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// External identity provider boundary.
///
/// Every call either returns a complete [`Identity`] or a
/// [`ProviderError`]; there is no partially-authenticated result.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new account.
    ///
    /// The password already passed the sign-up policy; the provider may
    /// still reject (e.g., email already registered).
    async fn sign_up(
        &self,
        email: &Email,
        password: &Password,
        display_name: &str,
        photo_url: Option<&str>,
    ) -> Result<Identity, ProviderError>;

    /// Verify credentials for an existing account.
    ///
    /// Takes the raw password: accounts predating the current sign-up
    /// policy must still be able to sign in.
    async fn sign_in(&self, email: &Email, password: &str) -> Result<Identity, ProviderError>;

    /// Complete a federated (third-party) sign-in.
    async fn federated_sign_in(&self) -> Result<Identity, ProviderError>;

    /// Invalidate the provider-side session.
    async fn sign_out(&self) -> Result<(), ProviderError>;

    /// Change the display attributes of the signed-in account.
    async fn update_profile(
        &self,
        email: &Email,
        display_name: &str,
        photo_url: &str,
    ) -> Result<Identity, ProviderError>;
}
