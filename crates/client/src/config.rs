//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FOODIEFINDS_API_URL` - Base URL of the review/favorite REST API
//! - `FOODIEFINDS_IDENTITY_URL` - Base URL of the identity provider
//! - `FOODIEFINDS_IDENTITY_API_KEY` - Identity provider API key
//!
//! ## Optional
//! - `FOODIEFINDS_USER_AGENT` - User-Agent sent with API requests
//!   (default: `foodiefinds-client/<version>`)

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default User-Agent header value.
const DEFAULT_USER_AGENT: &str = concat!("foodiefinds-client/", env!("CARGO_PKG_VERSION"));

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the review/favorite REST API
    pub api_base_url: Url,
    /// User-Agent header for API requests
    pub user_agent: String,
    /// Identity provider configuration
    pub identity: IdentityConfig,
}

/// Identity provider configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct IdentityConfig {
    /// Base URL of the identity provider
    pub base_url: Url,
    /// Provider API key (sent with every provider call)
    pub api_key: SecretString,
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_url("FOODIEFINDS_API_URL")?;
        let user_agent = get_env_or_default("FOODIEFINDS_USER_AGENT", DEFAULT_USER_AGENT);
        let identity = IdentityConfig::from_env()?;

        Ok(Self {
            api_base_url,
            user_agent,
            identity,
        })
    }
}

impl IdentityConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: get_url("FOODIEFINDS_IDENTITY_URL")?,
            api_key: SecretString::from(get_required_env("FOODIEFINDS_IDENTITY_API_KEY")?),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a required environment variable parsed as a URL.
fn get_url(key: &str) -> Result<Url, ConfigError> {
    let raw = get_required_env(key)?;
    Url::parse(&raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
