//! Review list and detail controllers.

use std::sync::Arc;

use tracing::warn;

use foodiefinds_core::ReviewId;

use super::{ListView, MutationOutcome, Phase};
use crate::error::Result;
use crate::models::{Favorite, Review};
use crate::remote::StoreError;
use crate::repo::{FavoriteRepository, ReviewRepository};
use crate::session::{AuthError, SessionStore};

/// Browse view over every published review, with search and a favorite
/// action.
pub struct AllReviewsController {
    reviews: ReviewRepository,
    favorites: FavoriteRepository,
    session: Arc<SessionStore>,
    list: ListView<Review>,
}

impl AllReviewsController {
    /// Create an idle controller; call [`refresh`](Self::refresh) on mount.
    #[must_use]
    pub fn new(
        reviews: ReviewRepository,
        favorites: FavoriteRepository,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            reviews,
            favorites,
            session,
            list: ListView::default(),
        }
    }

    /// Presentable state.
    #[must_use]
    pub const fn state(&self) -> &ListView<Review> {
        &self.list
    }

    /// Reload the unfiltered collection.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the fetch fails; the view lands in
    /// the error phase.
    pub async fn refresh(&mut self) -> Result<()> {
        self.fetch(None).await
    }

    /// Submit a search; an empty term reloads the full collection.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the fetch fails.
    pub async fn search(&mut self, term: &str) -> Result<()> {
        self.fetch(Some(term)).await
    }

    async fn fetch(&mut self, term: Option<&str>) -> Result<()> {
        self.list.begin_loading(term);
        match self.reviews.list(term).await {
            Ok(items) => {
                self.list.finish_loaded(items);
                Ok(())
            }
            Err(err) => {
                self.list.finish_error();
                Err(err)
            }
        }
    }

    /// Save a listed review to the signed-in member's favorites.
    ///
    /// Requires a session; the check runs before any network call. The
    /// all-reviews items themselves are untouched, so there is nothing to
    /// roll back here.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` with `NotAuthenticated` when signed out,
    /// `AppError::Store` with `DuplicateFavorite` when already saved, or
    /// `NotFound` when the id is not in the current list.
    pub async fn favorite(&mut self, id: &ReviewId) -> Result<Favorite> {
        let identity = self
            .session
            .current_identity()
            .ok_or(AuthError::NotAuthenticated)?;

        let review = self
            .list
            .items()
            .iter()
            .find(|review| review.id == *id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("review {id}")))?;

        self.favorites.add(&identity.email, &review).await
    }
}

/// The signed-in member's own reviews, with optimistic delete.
pub struct MyReviewsController {
    reviews: ReviewRepository,
    session: Arc<SessionStore>,
    list: ListView<Review>,
}

impl MyReviewsController {
    /// Create an idle controller; call [`refresh`](Self::refresh) on mount.
    #[must_use]
    pub fn new(reviews: ReviewRepository, session: Arc<SessionStore>) -> Self {
        Self {
            reviews,
            session,
            list: ListView::default(),
        }
    }

    /// Presentable state.
    #[must_use]
    pub const fn state(&self) -> &ListView<Review> {
        &self.list
    }

    /// Reload the member's reviews.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` with `NotAuthenticated` when signed out,
    /// `AppError::Store` if the fetch fails.
    pub async fn refresh(&mut self) -> Result<()> {
        let identity = self
            .session
            .current_identity()
            .ok_or(AuthError::NotAuthenticated)?;

        self.list.begin_loading(None);
        match self.reviews.list_by_owner(&identity.email).await {
            Ok(items) => {
                self.list.finish_loaded(items);
                Ok(())
            }
            Err(err) => {
                self.list.finish_error();
                Err(err)
            }
        }
    }

    /// Delete one of the member's reviews, optimistically.
    ///
    /// The row disappears immediately; if the remote store refuses, the
    /// pre-mutation items come back exactly and the error rides out in
    /// the outcome.
    pub async fn delete(&mut self, id: &ReviewId) -> MutationOutcome {
        let Some(identity) = self.session.current_identity() else {
            return MutationOutcome::RolledBack(AuthError::NotAuthenticated.into());
        };

        let snapshot = self.list.snapshot();
        self.list.retain(|review| review.id != *id);

        match self.reviews.delete(id, &identity.email).await {
            Ok(()) => MutationOutcome::Applied,
            Err(err) => {
                warn!(%id, error = %err, "Review delete refused, rolling back");
                self.list.restore(snapshot);
                MutationOutcome::RolledBack(err)
            }
        }
    }
}

/// Single-review view.
pub struct ReviewDetailController {
    reviews: ReviewRepository,
    phase: Phase,
    review: Option<Review>,
}

impl ReviewDetailController {
    /// Create an idle controller; call [`load`](Self::load) on mount.
    #[must_use]
    pub fn new(reviews: ReviewRepository) -> Self {
        Self {
            reviews,
            phase: Phase::Idle,
            review: None,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The loaded review, if any.
    #[must_use]
    pub const fn review(&self) -> Option<&Review> {
        self.review.as_ref()
    }

    /// Fetch the review.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` with `NotFound` for an unknown id.
    pub async fn load(&mut self, id: &ReviewId) -> Result<()> {
        self.phase = Phase::Loading;
        match self.reviews.get(id).await {
            Ok(review) => {
                self.review = Some(review);
                self.phase = Phase::Loaded;
                Ok(())
            }
            Err(err) => {
                self.phase = Phase::Error;
                Err(err)
            }
        }
    }
}

/// Read-only top-rated subset for the home view.
pub struct FeaturedReviewsController {
    reviews: ReviewRepository,
    list: ListView<Review>,
}

impl FeaturedReviewsController {
    /// Create an idle controller; call [`refresh`](Self::refresh) on mount.
    #[must_use]
    pub fn new(reviews: ReviewRepository) -> Self {
        Self {
            reviews,
            list: ListView::default(),
        }
    }

    /// Presentable state.
    #[must_use]
    pub const fn state(&self) -> &ListView<Review> {
        &self.list
    }

    /// Reload the featured subset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the fetch fails.
    pub async fn refresh(&mut self) -> Result<()> {
        self.list.begin_loading(None);
        match self.reviews.list_featured().await {
            Ok(items) => {
                self.list.finish_loaded(items);
                Ok(())
            }
            Err(err) => {
                self.list.finish_error();
                Err(err)
            }
        }
    }
}
