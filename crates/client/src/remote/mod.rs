//! Remote store contracts and the HTTP client.
//!
//! # Architecture
//!
//! - The remote store is the source of truth - no local sync, direct API
//!   calls, every view refetches on mount
//! - [`ReviewStore`], [`FavoriteStore`], and [`ProfileStore`] are the
//!   contracts the core requires from the persistence service; the
//!   bundled [`ApiClient`] implements them over the REST API
//! - Ownership and duplicate-favorite enforcement happen remotely; the
//!   client maps the store's refusals onto [`StoreError`] variants

mod http;

pub use http::ApiClient;

use async_trait::async_trait;
use thiserror::Error;

use foodiefinds_core::{Email, FavoriteId, ReviewId};

use crate::models::{Favorite, FavoriteDraft, Identity, Review, ReviewPayload};

/// Errors that can occur when talking to the remote store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The requester is not the owner of the entity.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The (owner, review) pair is already favorited.
    #[error("already in favorites: {0}")]
    DuplicateFavorite(String),

    /// The store rejected the payload (server-side validation echo).
    #[error("rejected by the remote store: {0}")]
    Rejected(String),

    /// HTTP transport failed.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Response had an unexpected status or shape.
    #[error("unexpected response ({status}): {body}")]
    Unexpected {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },
}

/// Remote review collection.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// List all reviews, most-recent first; a search term narrows to
    /// reviews whose food name contains it case-insensitively.
    async fn list(&self, search: Option<&str>) -> Result<Vec<Review>, StoreError>;

    /// Top-rated subset for the home view.
    async fn list_featured(&self) -> Result<Vec<Review>, StoreError>;

    /// Fetch one review.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown id.
    async fn get(&self, id: &ReviewId) -> Result<Review, StoreError>;

    /// List reviews written by `owner`, most-recent first.
    async fn list_by_owner(&self, owner: &Email) -> Result<Vec<Review>, StoreError>;

    /// Create a review; the store assigns the id and posting timestamp.
    async fn create(&self, payload: &ReviewPayload) -> Result<Review, StoreError>;

    /// Update a review.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Forbidden` if `requester` is not the stored
    /// owner (the store is the authority; no local pre-check).
    async fn update(
        &self,
        id: &ReviewId,
        payload: &ReviewPayload,
        requester: &Email,
    ) -> Result<Review, StoreError>;

    /// Delete a review, irreversibly.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Forbidden` if `requester` is not the stored
    /// owner, `StoreError::NotFound` if the id does not exist.
    async fn delete(&self, id: &ReviewId, requester: &Email) -> Result<(), StoreError>;
}

/// Remote favorite collection.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// List favorites saved by `owner`.
    async fn list_by_owner(&self, owner: &Email) -> Result<Vec<Favorite>, StoreError>;

    /// Save a favorite; the store assigns the id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateFavorite` if the (owner, review)
    /// pair already exists. The store checks this atomically relative to
    /// concurrent attempts for the same pair.
    async fn add(&self, draft: &FavoriteDraft) -> Result<Favorite, StoreError>;

    /// Remove a favorite.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Forbidden` if `requester` is not the stored
    /// owner, `StoreError::NotFound` if the id does not exist.
    async fn remove(&self, id: &FavoriteId, requester: &Email) -> Result<(), StoreError>;
}

/// Durable profile record.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert or refresh the member's profile snapshot.
    async fn upsert_profile(&self, profile: &Identity) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::NotFound("review r1".to_string());
        assert_eq!(err.to_string(), "not found: review r1");

        let err = StoreError::DuplicateFavorite("review r1".to_string());
        assert_eq!(err.to_string(), "already in favorites: review r1");

        let err = StoreError::Unexpected {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "unexpected response (502): bad gateway");
    }
}
