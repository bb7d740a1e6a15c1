//! HTTP identity provider implementation.
//!
//! Speaks a small JSON protocol against the configured identity service.
//! The shape mirrors hosted-auth REST conventions: one POST per account
//! action, API key in a header, identity attributes echoed back.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use foodiefinds_core::{Email, Password};

use super::{IdentityProvider, ProviderError};
use crate::config::IdentityConfig;
use crate::models::Identity;

/// API key header expected by the identity service.
const API_KEY_HEADER: &str = "x-api-key";

/// Identity provider over HTTP.
#[derive(Clone)]
pub struct HttpIdentityProvider {
    inner: Arc<ProviderInner>,
}

struct ProviderInner {
    client: reqwest::Client,
    base_url: Url,
    api_key: SecretString,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    display_name: &'a str,
    #[serde(rename = "photoURL", skip_serializing_if = "Option::is_none")]
    photo_url: Option<&'a str>,
}

#[derive(Serialize)]
struct SignInBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileBody<'a> {
    email: &'a str,
    display_name: &'a str,
    #[serde(rename = "photoURL")]
    photo_url: &'a str,
}

/// Identity attributes echoed back by the provider.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentityBody {
    email: Email,
    display_name: String,
    #[serde(rename = "photoURL", default)]
    photo_url: Option<String>,
}

impl From<IdentityBody> for Identity {
    fn from(body: IdentityBody) -> Self {
        Self::new(body.email, body.display_name, body.photo_url)
    }
}

impl HttpIdentityProvider {
    /// Create a new HTTP identity provider.
    #[must_use]
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            inner: Arc::new(ProviderInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                api_key: config.api_key.clone(),
            }),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        format!("{base}/v1/accounts:{action}")
    }

    async fn post<B: Serialize + Sync>(
        &self,
        action: &str,
        body: &B,
    ) -> Result<Response, ProviderError> {
        self.inner
            .client
            .post(self.endpoint(action))
            .header(API_KEY_HEADER, self.inner.api_key.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))
    }

    async fn parse_identity(response: Response) -> Result<Identity, ProviderError> {
        match response.status() {
            status if status.is_success() => {
                let body: IdentityBody = response
                    .json()
                    .await
                    .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
                Ok(body.into())
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ProviderError::InvalidCredentials)
            }
            status => {
                let message = response.text().await.unwrap_or_default();
                let message = message.chars().take(200).collect::<String>();
                if status.is_client_error() {
                    Err(ProviderError::Rejected(message))
                } else {
                    Err(ProviderError::Unavailable(message))
                }
            }
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_up(
        &self,
        email: &Email,
        password: &Password,
        display_name: &str,
        photo_url: Option<&str>,
    ) -> Result<Identity, ProviderError> {
        debug!(email = %email, "Provider sign-up");

        let response = self
            .post(
                "signUp",
                &SignUpBody {
                    email: email.as_str(),
                    password: password.expose(),
                    display_name,
                    photo_url,
                },
            )
            .await?;
        Self::parse_identity(response).await
    }

    async fn sign_in(&self, email: &Email, password: &str) -> Result<Identity, ProviderError> {
        debug!(email = %email, "Provider sign-in");

        let response = self
            .post(
                "signIn",
                &SignInBody {
                    email: email.as_str(),
                    password,
                },
            )
            .await?;
        Self::parse_identity(response).await
    }

    async fn federated_sign_in(&self) -> Result<Identity, ProviderError> {
        debug!("Provider federated sign-in");

        let response = self.post("federatedSignIn", &serde_json::json!({})).await?;
        Self::parse_identity(response).await
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        debug!("Provider sign-out");

        let response = self.post("signOut", &serde_json::json!({})).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ProviderError::Unavailable(
                message.chars().take(200).collect(),
            ))
        }
    }

    async fn update_profile(
        &self,
        email: &Email,
        display_name: &str,
        photo_url: &str,
    ) -> Result<Identity, ProviderError> {
        debug!(email = %email, "Provider profile update");

        let response = self
            .post(
                "update",
                &UpdateProfileBody {
                    email: email.as_str(),
                    display_name,
                    photo_url,
                },
            )
            .await?;
        Self::parse_identity(response).await
    }
}
