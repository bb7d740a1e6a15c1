//! CLI command implementations.

pub mod account;
pub mod favorites;
pub mod reviews;

use std::sync::Arc;

use thiserror::Error;

use foodiefinds_client::config::{ClientConfig, ConfigError};
use foodiefinds_client::identity::HttpIdentityProvider;
use foodiefinds_client::remote::ApiClient;
use foodiefinds_client::session::SessionStore;
use foodiefinds_client::AppError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A client-core operation failed.
    #[error("{}", .0.user_message())]
    App(#[from] AppError),
}

/// Everything a command needs to drive the client core.
pub struct Context {
    pub api: ApiClient,
    pub session: Arc<SessionStore>,
}

impl Context {
    /// Load configuration and wire up the client core.
    pub fn from_env() -> Result<Self, CliError> {
        let config = ClientConfig::from_env()?;
        let api = ApiClient::new(&config);
        let provider = Arc::new(HttpIdentityProvider::new(&config.identity));
        let session = Arc::new(SessionStore::new(provider, Arc::new(api.clone())));
        Ok(Self { api, session })
    }

    /// Load configuration, wire up the client core, and sign in.
    pub async fn signed_in(email: &str, password: &str) -> Result<Self, CliError> {
        let context = Self::from_env()?;
        context.session.sign_in(email, password).await.map_err(AppError::from)?;
        Ok(context)
    }
}
