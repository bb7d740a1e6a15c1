//! Review and favorite repositories.
//!
//! Thin domain layer over the remote store contracts: local validation
//! runs before any network call, owner attribution is stamped from the
//! signed-in identity, and everything else defers to the store (which is
//! the authority on ownership and duplicates).

use std::sync::Arc;

use foodiefinds_core::{Email, FavoriteId, ReviewId};

use crate::error::Result;
use crate::models::{Favorite, FavoriteDraft, Identity, Review, ReviewDraft};
use crate::models::review::ReviewPayload;
use crate::remote::{FavoriteStore, ReviewStore};

/// Repository for the remote review collection.
#[derive(Clone)]
pub struct ReviewRepository {
    store: Arc<dyn ReviewStore>,
}

impl ReviewRepository {
    /// Create a new review repository.
    #[must_use]
    pub fn new(store: Arc<dyn ReviewStore>) -> Self {
        Self { store }
    }

    /// List all reviews, most-recent first, optionally narrowed by a
    /// case-insensitive food-name search term.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the remote call fails.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Review>> {
        Ok(self.store.list(search).await?)
    }

    /// Top-rated subset for the home view.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the remote call fails.
    pub async fn list_featured(&self) -> Result<Vec<Review>> {
        Ok(self.store.list_featured().await?)
    }

    /// Fetch one review by id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` with `NotFound` for an unknown id.
    pub async fn get(&self, id: &ReviewId) -> Result<Review> {
        Ok(self.store.get(id).await?)
    }

    /// List reviews written by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the remote call fails.
    pub async fn list_by_owner(&self, owner: &Email) -> Result<Vec<Review>> {
        Ok(self.store.list_by_owner(owner).await?)
    }

    /// Publish a new review owned by `owner`.
    ///
    /// The draft is validated locally first; an invalid draft never
    /// reaches the network. The store assigns id and posting timestamp.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an incomplete draft,
    /// `AppError::Store` if the remote call fails.
    pub async fn create(&self, draft: &ReviewDraft, owner: &Identity) -> Result<Review> {
        let payload = build_payload(draft, owner)?;
        Ok(self.store.create(&payload).await?)
    }

    /// Update an existing review as `requester`.
    ///
    /// Ownership is enforced remotely; a non-owner gets
    /// `StoreError::Forbidden` back, not a local refusal.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an incomplete draft,
    /// `AppError::Store` with `Forbidden` when `requester` is not the
    /// stored owner.
    pub async fn update(
        &self,
        id: &ReviewId,
        draft: &ReviewDraft,
        requester: &Identity,
    ) -> Result<Review> {
        let payload = build_payload(draft, requester)?;
        Ok(self.store.update(id, &payload, &requester.email).await?)
    }

    /// Delete a review as `requester`. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` with `Forbidden` when `requester` is not
    /// the stored owner, `NotFound` for an unknown id.
    pub async fn delete(&self, id: &ReviewId, requester: &Email) -> Result<()> {
        Ok(self.store.delete(id, requester).await?)
    }
}

/// Validate a draft and stamp the author attribution.
fn build_payload(draft: &ReviewDraft, author: &Identity) -> Result<ReviewPayload> {
    let rating = draft.validate()?;
    Ok(ReviewPayload {
        food_name: draft.food_name.clone(),
        food_image: draft.food_image.clone(),
        restaurant_name: draft.restaurant_name.clone(),
        location: draft.location.clone(),
        rating,
        review_text: draft.review_text.clone(),
        owner: author.email.clone(),
        owner_name: author.display_name.clone(),
        owner_photo: Some(author.photo_url.clone()),
    })
}

/// Repository for the remote favorite collection.
#[derive(Clone)]
pub struct FavoriteRepository {
    store: Arc<dyn FavoriteStore>,
}

impl FavoriteRepository {
    /// Create a new favorite repository.
    #[must_use]
    pub fn new(store: Arc<dyn FavoriteStore>) -> Self {
        Self { store }
    }

    /// List favorites saved by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the remote call fails.
    pub async fn list_by_owner(&self, owner: &Email) -> Result<Vec<Favorite>> {
        Ok(self.store.list_by_owner(owner).await?)
    }

    /// Save `review` to `owner`'s favorites, capturing the display
    /// snapshot at favorite-time.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` with `DuplicateFavorite` when the pair
    /// already exists; the store checks atomically.
    pub async fn add(&self, owner: &Email, review: &Review) -> Result<Favorite> {
        let draft = FavoriteDraft::snapshot(owner.clone(), review);
        Ok(self.store.add(&draft).await?)
    }

    /// Remove a favorite as `requester`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` with `Forbidden` when `requester` is not
    /// the stored owner, `NotFound` for an unknown id.
    pub async fn remove(&self, id: &FavoriteId, requester: &Email) -> Result<()> {
        Ok(self.store.remove(id, requester).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::error::AppError;
    use crate::models::ValidationError;
    use crate::remote::StoreError;

    /// A store that must never be reached.
    struct UnreachableStore;

    #[async_trait]
    impl ReviewStore for UnreachableStore {
        async fn list(&self, _search: Option<&str>) -> std::result::Result<Vec<Review>, StoreError> {
            panic!("validation must pre-empt the network call");
        }

        async fn list_featured(&self) -> std::result::Result<Vec<Review>, StoreError> {
            panic!("validation must pre-empt the network call");
        }

        async fn get(&self, _id: &ReviewId) -> std::result::Result<Review, StoreError> {
            panic!("validation must pre-empt the network call");
        }

        async fn list_by_owner(
            &self,
            _owner: &Email,
        ) -> std::result::Result<Vec<Review>, StoreError> {
            panic!("validation must pre-empt the network call");
        }

        async fn create(
            &self,
            _payload: &ReviewPayload,
        ) -> std::result::Result<Review, StoreError> {
            panic!("validation must pre-empt the network call");
        }

        async fn update(
            &self,
            _id: &ReviewId,
            _payload: &ReviewPayload,
            _requester: &Email,
        ) -> std::result::Result<Review, StoreError> {
            panic!("validation must pre-empt the network call");
        }

        async fn delete(
            &self,
            _id: &ReviewId,
            _requester: &Email,
        ) -> std::result::Result<(), StoreError> {
            panic!("validation must pre-empt the network call");
        }
    }

    fn author() -> Identity {
        Identity::new(Email::parse("author@example.com").unwrap(), "Author", None)
    }

    #[tokio::test]
    async fn test_create_rejects_incomplete_draft_before_network() {
        let repo = ReviewRepository::new(Arc::new(UnreachableStore));
        let draft = ReviewDraft::default();

        let err = repo.create(&draft, &author()).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::MissingRating)
        ));
    }

    #[tokio::test]
    async fn test_update_rejects_blank_field_before_network() {
        let repo = ReviewRepository::new(Arc::new(UnreachableStore));
        let draft = ReviewDraft {
            food_name: "Pizza".into(),
            food_image: String::new(),
            restaurant_name: "Tony's".into(),
            location: "Brooklyn".into(),
            rating: Some(foodiefinds_core::Rating::new(4).unwrap()),
            review_text: "Good".into(),
        };

        let err = repo
            .update(&ReviewId::new("r1"), &draft, &author())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::MissingField("foodImage"))
        ));
    }
}
