//! Per-view state machines.
//!
//! Every list view walks `idle → loading → {loaded | error}` and
//! re-enters `loading` on any explicit refresh (navigation mount, search
//! submission, post-mutation refresh). Mutations apply optimistically and
//! reconcile against the remote store: kept on success, restored from the
//! pre-mutation snapshot on failure, with the error surfaced through
//! [`MutationOutcome`].
//!
//! There is no in-flight cancellation: a controller dropped mid-request
//! drops its future with it, and the eventual result is simply never
//! applied.

mod editor;
mod favorites;
mod reviews;

pub use editor::{EditorMode, EditorPhase, ReviewEditor};
pub use favorites::MyFavoritesController;
pub use reviews::{
    AllReviewsController, FeaturedReviewsController, MyReviewsController, ReviewDetailController,
};

use crate::error::AppError;

/// Lifecycle of a presented list or item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Created, nothing fetched yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Loaded,
    /// The last fetch failed.
    Error,
}

/// Reconciliation report for an optimistic mutation.
///
/// The pending state is the in-flight future itself; once it resolves,
/// the mutation either stuck or the pre-mutation snapshot was restored.
#[derive(Debug)]
#[must_use = "a rolled-back mutation carries the error to surface"]
pub enum MutationOutcome {
    /// The optimistic update was confirmed by the remote store.
    Applied,
    /// The remote store refused; local state was restored.
    RolledBack(AppError),
}

impl MutationOutcome {
    /// Whether the mutation stuck.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Convert into a `Result`, handing the rollback error to `?`.
    ///
    /// # Errors
    ///
    /// Returns the rollback error when the mutation did not stick.
    pub fn into_result(self) -> crate::error::Result<()> {
        match self {
            Self::Applied => Ok(()),
            Self::RolledBack(err) => Err(err),
        }
    }
}

/// State bound to one presented list.
///
/// Items stay exactly in the order the repository returned them; the
/// controller never re-sorts locally. Transient: controllers are
/// recreated per navigation, nothing here persists.
#[derive(Debug)]
pub struct ListView<T> {
    phase: Phase,
    items: Vec<T>,
    last_query: Option<String>,
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            items: Vec::new(),
            last_query: None,
        }
    }
}

impl<T: Clone> ListView<T> {
    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Items as last reconciled, in repository order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The query the current items answer, if any.
    #[must_use]
    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    /// Enter `loading` for a fresh fetch.
    ///
    /// A request that never resolves leaves the view here; there is no
    /// client-side timeout beyond the transport's.
    pub fn begin_loading(&mut self, query: Option<&str>) {
        self.phase = Phase::Loading;
        self.last_query = query.map(str::to_owned);
    }

    /// Fetch succeeded; adopt the repository's ordering as-is.
    pub fn finish_loaded(&mut self, items: Vec<T>) {
        self.items = items;
        self.phase = Phase::Loaded;
    }

    /// Fetch failed; items keep their previous value.
    pub fn finish_error(&mut self) {
        self.phase = Phase::Error;
    }

    /// Snapshot the items before an optimistic mutation.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.items.clone()
    }

    /// Apply an optimistic removal.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }

    /// Restore the pre-mutation snapshot after a remote refusal.
    pub fn restore(&mut self, snapshot: Vec<T>) {
        self.items = snapshot;
    }
}
