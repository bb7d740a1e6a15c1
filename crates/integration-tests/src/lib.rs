//! Integration tests for the FoodieFinds client core.
//!
//! The fixtures here stand in for the two external collaborators:
//!
//! - [`InMemoryRemote`] implements the remote store contracts with the
//!   same enforcement the real service performs (remote-side ownership
//!   checks, atomic duplicate-favorite detection, most-recent-first
//!   ordering), plus one-shot failure injection for rollback tests.
//! - [`FakeIdentityProvider`] keeps accounts in memory and answers the
//!   provider contract.
//!
//! Scenario tests live under `tests/`, one file per area:
//!
//! - `session` - sign-up policy, transitions, profile upserts
//! - `reviews` - CRUD, validation, ownership, search ordering
//! - `favorites` - duplicate detection, removal
//! - `controllers` - view phases and optimistic reconciliation

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use foodiefinds_core::{Email, FavoriteId, Password, Rating, ReviewId};

use foodiefinds_client::identity::{IdentityProvider, ProviderError};
use foodiefinds_client::models::{
    Favorite, FavoriteDraft, Identity, Review, ReviewDraft, ReviewPayload,
};
use foodiefinds_client::remote::{FavoriteStore, ProfileStore, ReviewStore, StoreError};
use foodiefinds_client::repo::{FavoriteRepository, ReviewRepository};
use foodiefinds_client::session::SessionStore;

// =============================================================================
// In-memory remote store
// =============================================================================

#[derive(Default)]
struct RemoteState {
    reviews: Vec<Review>,
    favorites: Vec<Favorite>,
    profile_upserts: Vec<Identity>,
}

/// Remote store fixture honoring the real service's contracts.
///
/// One mutex serializes every operation, which is exactly the atomicity
/// the duplicate-favorite check needs.
#[derive(Default)]
pub struct InMemoryRemote {
    state: Mutex<RemoteState>,
    clock: AtomicI64,
    fail_next_mutation: AtomicBool,
}

impl InMemoryRemote {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make the next mutating operation fail with a server error.
    pub fn fail_next_mutation(&self) {
        self.fail_next_mutation.store(true, Ordering::SeqCst);
    }

    /// How many profile snapshots have been upserted.
    #[must_use]
    pub fn profile_upsert_count(&self) -> usize {
        self.state.lock().unwrap().profile_upserts.len()
    }

    /// Number of stored favorites, across all owners.
    #[must_use]
    pub fn favorite_count(&self) -> usize {
        self.state.lock().unwrap().favorites.len()
    }

    /// Monotonic timestamps so "most-recent first" is deterministic.
    fn next_posted_at(&self) -> DateTime<Utc> {
        let tick = self.clock.fetch_add(1, Ordering::SeqCst);
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap() + Duration::seconds(tick)
    }

    fn take_injected_failure(&self) -> Option<StoreError> {
        self.fail_next_mutation
            .swap(false, Ordering::SeqCst)
            .then(|| StoreError::Unexpected {
                status: 503,
                body: "injected outage".to_string(),
            })
    }
}

#[async_trait]
impl ReviewStore for InMemoryRemote {
    async fn list(&self, search: Option<&str>) -> Result<Vec<Review>, StoreError> {
        let state = self.state.lock().unwrap();
        let mut reviews: Vec<Review> = match search.filter(|term| !term.is_empty()) {
            Some(term) => {
                let needle = term.to_lowercase();
                state
                    .reviews
                    .iter()
                    .filter(|review| review.food_name.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
            None => state.reviews.clone(),
        };
        reviews.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        Ok(reviews)
    }

    async fn list_featured(&self) -> Result<Vec<Review>, StoreError> {
        let state = self.state.lock().unwrap();
        let mut reviews = state.reviews.clone();
        reviews.sort_by(|a, b| {
            b.rating
                .cmp(&a.rating)
                .then_with(|| b.posted_at.cmp(&a.posted_at))
        });
        reviews.truncate(6);
        Ok(reviews)
    }

    async fn get(&self, id: &ReviewId) -> Result<Review, StoreError> {
        let state = self.state.lock().unwrap();
        state
            .reviews
            .iter()
            .find(|review| review.id == *id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("review {id}")))
    }

    async fn list_by_owner(&self, owner: &Email) -> Result<Vec<Review>, StoreError> {
        let state = self.state.lock().unwrap();
        let mut reviews: Vec<Review> = state
            .reviews
            .iter()
            .filter(|review| review.owner == *owner)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        Ok(reviews)
    }

    async fn create(&self, payload: &ReviewPayload) -> Result<Review, StoreError> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        let review = Review {
            id: ReviewId::new(Uuid::new_v4().simple().to_string()),
            food_name: payload.food_name.clone(),
            food_image: payload.food_image.clone(),
            restaurant_name: payload.restaurant_name.clone(),
            location: payload.location.clone(),
            rating: payload.rating,
            review_text: payload.review_text.clone(),
            owner: payload.owner.clone(),
            owner_name: payload.owner_name.clone(),
            owner_photo: payload.owner_photo.clone(),
            posted_at: self.next_posted_at(),
        };
        self.state.lock().unwrap().reviews.push(review.clone());
        Ok(review)
    }

    async fn update(
        &self,
        id: &ReviewId,
        payload: &ReviewPayload,
        requester: &Email,
    ) -> Result<Review, StoreError> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        let mut state = self.state.lock().unwrap();
        let review = state
            .reviews
            .iter_mut()
            .find(|review| review.id == *id)
            .ok_or_else(|| StoreError::NotFound(format!("review {id}")))?;

        if review.owner != *requester {
            return Err(StoreError::Forbidden(format!("review {id}")));
        }

        // Content fields only; owner attribution and timestamp are immutable
        review.food_name = payload.food_name.clone();
        review.food_image = payload.food_image.clone();
        review.restaurant_name = payload.restaurant_name.clone();
        review.location = payload.location.clone();
        review.rating = payload.rating;
        review.review_text = payload.review_text.clone();
        Ok(review.clone())
    }

    async fn delete(&self, id: &ReviewId, requester: &Email) -> Result<(), StoreError> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        let mut state = self.state.lock().unwrap();
        let position = state
            .reviews
            .iter()
            .position(|review| review.id == *id)
            .ok_or_else(|| StoreError::NotFound(format!("review {id}")))?;

        if state.reviews[position].owner != *requester {
            return Err(StoreError::Forbidden(format!("review {id}")));
        }
        state.reviews.remove(position);
        Ok(())
    }
}

#[async_trait]
impl FavoriteStore for InMemoryRemote {
    async fn list_by_owner(&self, owner: &Email) -> Result<Vec<Favorite>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .favorites
            .iter()
            .filter(|favorite| favorite.owner == *owner)
            .cloned()
            .collect())
    }

    async fn add(&self, draft: &FavoriteDraft) -> Result<Favorite, StoreError> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        // Duplicate check and insert under one lock: atomic relative to
        // concurrent adds for the same pair
        let mut state = self.state.lock().unwrap();
        if state
            .favorites
            .iter()
            .any(|favorite| favorite.owner == draft.owner && favorite.review_id == draft.review_id)
        {
            return Err(StoreError::DuplicateFavorite(format!(
                "review {}",
                draft.review_id
            )));
        }
        let favorite = Favorite {
            id: FavoriteId::new(Uuid::new_v4().simple().to_string()),
            owner: draft.owner.clone(),
            review_id: draft.review_id.clone(),
            food_name: draft.food_name.clone(),
            food_image: draft.food_image.clone(),
            restaurant_name: draft.restaurant_name.clone(),
            location: draft.location.clone(),
            rating: draft.rating,
            reviewer_name: draft.reviewer_name.clone(),
        };
        state.favorites.push(favorite.clone());
        Ok(favorite)
    }

    async fn remove(&self, id: &FavoriteId, requester: &Email) -> Result<(), StoreError> {
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        let mut state = self.state.lock().unwrap();
        let position = state
            .favorites
            .iter()
            .position(|favorite| favorite.id == *id)
            .ok_or_else(|| StoreError::NotFound(format!("favorite {id}")))?;

        if state.favorites[position].owner != *requester {
            return Err(StoreError::Forbidden(format!("favorite {id}")));
        }
        state.favorites.remove(position);
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for InMemoryRemote {
    async fn upsert_profile(&self, profile: &Identity) -> Result<(), StoreError> {
        self.state
            .lock()
            .unwrap()
            .profile_upserts
            .push(profile.clone());
        Ok(())
    }
}

// =============================================================================
// Fake identity provider
// =============================================================================

/// Identity provider fixture keeping accounts in memory.
#[derive(Default)]
pub struct FakeIdentityProvider {
    accounts: Mutex<HashMap<String, (String, Identity)>>,
    fail_sign_out: AtomicBool,
}

impl FakeIdentityProvider {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every subsequent provider sign-out fail.
    pub fn fail_sign_out(&self) {
        self.fail_sign_out.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn sign_up(
        &self,
        email: &Email,
        password: &Password,
        display_name: &str,
        photo_url: Option<&str>,
    ) -> Result<Identity, ProviderError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email.as_str()) {
            return Err(ProviderError::Rejected(
                "email already registered".to_string(),
            ));
        }
        let identity = Identity::new(email.clone(), display_name, photo_url.map(str::to_owned));
        accounts.insert(
            email.as_str().to_owned(),
            (password.expose().to_owned(), identity.clone()),
        );
        Ok(identity)
    }

    async fn sign_in(&self, email: &Email, password: &str) -> Result<Identity, ProviderError> {
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(email.as_str()) {
            Some((stored, identity)) if stored == password => Ok(identity.clone()),
            _ => Err(ProviderError::InvalidCredentials),
        }
    }

    async fn federated_sign_in(&self) -> Result<Identity, ProviderError> {
        let email = Email::parse("federated@example.com").expect("static email");
        let identity = Identity::new(email.clone(), "Federated Member", None);
        self.accounts
            .lock()
            .unwrap()
            .entry(email.as_str().to_owned())
            .or_insert_with(|| (String::new(), identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(ProviderError::Unavailable("token revocation down".into()));
        }
        Ok(())
    }

    async fn update_profile(
        &self,
        email: &Email,
        display_name: &str,
        photo_url: &str,
    ) -> Result<Identity, ProviderError> {
        let mut accounts = self.accounts.lock().unwrap();
        let (_, identity) = accounts
            .get_mut(email.as_str())
            .ok_or(ProviderError::InvalidCredentials)?;
        identity.display_name = display_name.to_owned();
        identity.photo_url = photo_url.to_owned();
        Ok(identity.clone())
    }
}

// =============================================================================
// Test context
// =============================================================================

/// Wires the fixtures into a ready-to-drive client core.
pub struct TestContext {
    pub remote: Arc<InMemoryRemote>,
    pub provider: Arc<FakeIdentityProvider>,
    pub session: Arc<SessionStore>,
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        let remote = InMemoryRemote::new();
        let provider = FakeIdentityProvider::new();
        let session = Arc::new(SessionStore::new(provider.clone(), remote.clone()));
        Self {
            remote,
            provider,
            session,
        }
    }

    #[must_use]
    pub fn reviews(&self) -> ReviewRepository {
        ReviewRepository::new(self.remote.clone())
    }

    #[must_use]
    pub fn favorites(&self) -> FavoriteRepository {
        FavoriteRepository::new(self.remote.clone())
    }

    /// Register and establish a session for `email`.
    pub async fn sign_up_as(&self, email: &str, name: &str) -> Identity {
        self.session
            .sign_up(email, "Abc123", Some("Abc123"), name, None)
            .await
            .expect("fixture sign-up should succeed")
    }

    /// Publish a review as `author` without going through an editor.
    pub async fn seed_review(&self, author: &Identity, food_name: &str, rating: u8) -> Review {
        let draft = draft(food_name, rating);
        self.reviews()
            .create(&draft, author)
            .await
            .expect("fixture review should save")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete, submittable draft.
#[must_use]
pub fn draft(food_name: &str, rating: u8) -> ReviewDraft {
    ReviewDraft {
        food_name: food_name.to_owned(),
        food_image: format!("https://img.example/{}.jpg", food_name.to_lowercase()),
        restaurant_name: "Corner Kitchen".to_owned(),
        location: "Portland, OR".to_owned(),
        rating: Rating::new(rating).ok(),
        review_text: format!("Thoughts on the {food_name}."),
    }
}
