//! My-favorites controller.

use std::sync::Arc;

use tracing::warn;

use foodiefinds_core::FavoriteId;

use super::{ListView, MutationOutcome};
use crate::error::Result;
use crate::models::Favorite;
use crate::repo::FavoriteRepository;
use crate::session::{AuthError, SessionStore};

/// The signed-in member's favorites, with optimistic remove.
///
/// Renders only the denormalized snapshot captured at favorite-time; the
/// underlying review is never re-fetched here.
pub struct MyFavoritesController {
    favorites: FavoriteRepository,
    session: Arc<SessionStore>,
    list: ListView<Favorite>,
}

impl MyFavoritesController {
    /// Create an idle controller; call [`refresh`](Self::refresh) on mount.
    #[must_use]
    pub fn new(favorites: FavoriteRepository, session: Arc<SessionStore>) -> Self {
        Self {
            favorites,
            session,
            list: ListView::default(),
        }
    }

    /// Presentable state.
    #[must_use]
    pub const fn state(&self) -> &ListView<Favorite> {
        &self.list
    }

    /// Reload the member's favorites.
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
        match self.favorites.list_by_owner(&identity.email).await {
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

    /// Remove a favorite, optimistically.
    ///
    /// The card disappears immediately; if the remote store refuses, the
    /// pre-mutation items come back exactly and the error rides out in
    /// the outcome.
    pub async fn remove(&mut self, id: &FavoriteId) -> MutationOutcome {
        let Some(identity) = self.session.current_identity() else {
            return MutationOutcome::RolledBack(AuthError::NotAuthenticated.into());
        };

        let snapshot = self.list.snapshot();
        self.list.retain(|favorite| favorite.id != *id);

        match self.favorites.remove(id, &identity.email).await {
            Ok(()) => MutationOutcome::Applied,
            Err(err) => {
                warn!(%id, error = %err, "Favorite remove refused, rolling back");
                self.list.restore(snapshot);
                MutationOutcome::RolledBack(err)
            }
        }
    }
}
