//! REST API client implementation.
//!
//! One shared `reqwest::Client` behind an `Arc`; the base URL comes from
//! configuration. Requester identity for owner-enforced mutations travels
//! in the `x-user-email` header; the store decides, the client only maps
//! refusals onto [`StoreError`].

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use foodiefinds_core::{Email, FavoriteId, ReviewId};

use super::{FavoriteStore, ProfileStore, ReviewStore, StoreError};
use crate::config::ClientConfig;
use crate::models::{Favorite, FavoriteDraft, Identity, Review, ReviewPayload};

/// Header naming the requester for owner-enforced mutations.
const REQUESTER_HEADER: &str = "x-user-email";

/// Client for the FoodieFinds REST API.
///
/// Implements [`ReviewStore`], [`FavoriteStore`], and [`ProfileStore`].
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .unwrap_or_default();

        Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_base_url.clone(),
            }),
        }
    }

    /// Build an absolute endpoint URL from a path.
    fn endpoint(&self, path: &str) -> String {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        format!("{base}{path}")
    }

    /// Parse a success response body as JSON.
    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            error!(
                error = %e,
                body = %truncate(&body),
                "Failed to parse remote store response"
            );
            StoreError::Parse(e)
        })
    }
}

/// Map a non-success response onto a `StoreError`.
///
/// `duplicate_on_bad_request` is set only for the add-favorite endpoint,
/// where the store answers 400 for an existing (owner, review) pair.
async fn reject(
    response: Response,
    context: &str,
    duplicate_on_bad_request: bool,
) -> StoreError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match status {
        StatusCode::NOT_FOUND => StoreError::NotFound(context.to_string()),
        StatusCode::FORBIDDEN => StoreError::Forbidden(context.to_string()),
        StatusCode::BAD_REQUEST if duplicate_on_bad_request => {
            StoreError::DuplicateFavorite(context.to_string())
        }
        StatusCode::BAD_REQUEST => StoreError::Rejected(truncate(&body)),
        _ => {
            error!(
                status = %status,
                body = %truncate(&body),
                context,
                "Remote store returned non-success status"
            );
            StoreError::Unexpected {
                status: status.as_u16(),
                body: truncate(&body),
            }
        }
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}

#[async_trait]
impl ReviewStore for ApiClient {
    async fn list(&self, search: Option<&str>) -> Result<Vec<Review>, StoreError> {
        debug!(search = search.unwrap_or(""), "Listing reviews");

        let mut request = self.inner.client.get(self.endpoint("/api/reviews"));
        if let Some(term) = search.filter(|t| !t.is_empty()) {
            request = request.query(&[("search", term)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(reject(response, "reviews", false).await);
        }
        Self::parse_json(response).await
    }

    async fn list_featured(&self) -> Result<Vec<Review>, StoreError> {
        debug!("Listing featured reviews");

        let response = self
            .inner
            .client
            .get(self.endpoint("/api/reviews/featured"))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(reject(response, "featured reviews", false).await);
        }
        Self::parse_json(response).await
    }

    async fn get(&self, id: &ReviewId) -> Result<Review, StoreError> {
        debug!(%id, "Fetching review");

        let response = self
            .inner
            .client
            .get(self.endpoint(&format!("/api/reviews/{id}")))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(reject(response, &format!("review {id}"), false).await);
        }
        Self::parse_json(response).await
    }

    async fn list_by_owner(&self, owner: &Email) -> Result<Vec<Review>, StoreError> {
        debug!(owner = %owner, "Listing reviews by owner");

        let response = self
            .inner
            .client
            .get(self.endpoint(&format!("/api/reviews/user/{owner}")))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(reject(response, &format!("reviews of {owner}"), false).await);
        }
        Self::parse_json(response).await
    }

    async fn create(&self, payload: &ReviewPayload) -> Result<Review, StoreError> {
        debug!(food_name = %payload.food_name, "Creating review");

        let response = self
            .inner
            .client
            .post(self.endpoint("/api/reviews"))
            .json(payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(reject(response, "new review", false).await);
        }
        Self::parse_json(response).await
    }

    async fn update(
        &self,
        id: &ReviewId,
        payload: &ReviewPayload,
        requester: &Email,
    ) -> Result<Review, StoreError> {
        debug!(%id, requester = %requester, "Updating review");

        let response = self
            .inner
            .client
            .put(self.endpoint(&format!("/api/reviews/{id}")))
            .header(REQUESTER_HEADER, requester.as_str())
            .json(payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(reject(response, &format!("review {id}"), false).await);
        }
        Self::parse_json(response).await
    }

    async fn delete(&self, id: &ReviewId, requester: &Email) -> Result<(), StoreError> {
        debug!(%id, requester = %requester, "Deleting review");

        let response = self
            .inner
            .client
            .delete(self.endpoint(&format!("/api/reviews/{id}")))
            .header(REQUESTER_HEADER, requester.as_str())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(reject(response, &format!("review {id}"), false).await);
        }
        Ok(())
    }
}

#[async_trait]
impl FavoriteStore for ApiClient {
    async fn list_by_owner(&self, owner: &Email) -> Result<Vec<Favorite>, StoreError> {
        debug!(owner = %owner, "Listing favorites");

        let response = self
            .inner
            .client
            .get(self.endpoint(&format!("/api/favorites/{owner}")))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(reject(response, &format!("favorites of {owner}"), false).await);
        }
        Self::parse_json(response).await
    }

    async fn add(&self, draft: &FavoriteDraft) -> Result<Favorite, StoreError> {
        debug!(review_id = %draft.review_id, owner = %draft.owner, "Adding favorite");

        let response = self
            .inner
            .client
            .post(self.endpoint("/api/favorites"))
            .json(draft)
            .send()
            .await?;
        if !response.status().is_success() {
            // 400 from this endpoint means the pair already exists
            return Err(reject(response, &format!("review {}", draft.review_id), true).await);
        }
        Self::parse_json(response).await
    }

    async fn remove(&self, id: &FavoriteId, requester: &Email) -> Result<(), StoreError> {
        debug!(%id, requester = %requester, "Removing favorite");

        let response = self
            .inner
            .client
            .delete(self.endpoint(&format!("/api/favorites/{id}")))
            .header(REQUESTER_HEADER, requester.as_str())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(reject(response, &format!("favorite {id}"), false).await);
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for ApiClient {
    async fn upsert_profile(&self, profile: &Identity) -> Result<(), StoreError> {
        debug!(email = %profile.email, "Upserting profile snapshot");

        let response = self
            .inner
            .client
            .post(self.endpoint("/api/users"))
            .json(profile)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(reject(response, &format!("profile {}", profile.email), false).await);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    use crate::config::IdentityConfig;

    fn config(base: &str) -> ClientConfig {
        ClientConfig {
            api_base_url: Url::parse(base).unwrap(),
            user_agent: "test-agent".to_string(),
            identity: IdentityConfig {
                base_url: Url::parse("https://id.example.com").unwrap(),
                api_key: SecretString::from("k"),
            },
        }
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = ApiClient::new(&config("https://api.example.com/"));
        assert_eq!(
            client.endpoint("/api/reviews"),
            "https://api.example.com/api/reviews"
        );

        let client = ApiClient::new(&config("https://api.example.com"));
        assert_eq!(
            client.endpoint("/api/reviews/featured"),
            "https://api.example.com/api/reviews/featured"
        );
    }

    #[test]
    fn test_truncate_caps_body() {
        let long = "x".repeat(500);
        assert_eq!(truncate(&long).len(), 200);
    }
}
