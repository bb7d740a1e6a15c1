//! Review editor state machine.
//!
//! Two-phase flow: editing an existing review first walks
//! `loading-existing → ready`; submission then walks `submitting →
//! {done | error}`. A draft with no star rating is refused before the
//! repository is contacted, leaving the editor ready for another try.

use std::sync::Arc;

use foodiefinds_core::ReviewId;

use crate::error::Result;
use crate::models::{Review, ReviewDraft};
use crate::repo::ReviewRepository;
use crate::session::{AuthError, SessionStore};

/// Whether the editor creates a fresh review or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    /// Publishing a new review.
    Create,
    /// Editing the review with this id.
    Edit(ReviewId),
}

/// Editor lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    /// Fetching the review being edited.
    LoadingExisting,
    /// Draft is editable; submission allowed.
    Ready,
    /// Submission in flight.
    Submitting,
    /// Submission confirmed by the remote store.
    Done,
    /// Load or submission failed.
    Error,
}

/// Assembles and submits a review draft.
pub struct ReviewEditor {
    reviews: ReviewRepository,
    session: Arc<SessionStore>,
    mode: EditorMode,
    phase: EditorPhase,
    draft: ReviewDraft,
}

impl ReviewEditor {
    /// Editor for a brand-new review; immediately ready.
    #[must_use]
    pub fn create(reviews: ReviewRepository, session: Arc<SessionStore>) -> Self {
        Self {
            reviews,
            session,
            mode: EditorMode::Create,
            phase: EditorPhase::Ready,
            draft: ReviewDraft::default(),
        }
    }

    /// Editor for an existing review; call
    /// [`load_existing`](Self::load_existing) to fetch the draft.
    #[must_use]
    pub fn edit(reviews: ReviewRepository, session: Arc<SessionStore>, id: ReviewId) -> Self {
        Self {
            reviews,
            session,
            mode: EditorMode::Edit(id),
            phase: EditorPhase::LoadingExisting,
            draft: ReviewDraft::default(),
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> EditorPhase {
        self.phase
    }

    /// The editor's mode.
    #[must_use]
    pub const fn mode(&self) -> &EditorMode {
        &self.mode
    }

    /// Read the draft.
    #[must_use]
    pub const fn draft(&self) -> &ReviewDraft {
        &self.draft
    }

    /// Edit the draft; meaningful once the editor is ready.
    pub const fn draft_mut(&mut self) -> &mut ReviewDraft {
        &mut self.draft
    }

    /// Fetch the review being edited and pre-fill the draft.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` with `NotFound` for an unknown id; the
    /// editor lands in the error phase.
    pub async fn load_existing(&mut self) -> Result<()> {
        let EditorMode::Edit(id) = self.mode.clone() else {
            // Nothing to load in create mode
            self.phase = EditorPhase::Ready;
            return Ok(());
        };

        self.phase = EditorPhase::LoadingExisting;
        match self.reviews.get(&id).await {
            Ok(review) => {
                self.draft = ReviewDraft::from_review(&review);
                self.phase = EditorPhase::Ready;
                Ok(())
            }
            Err(err) => {
                self.phase = EditorPhase::Error;
                Err(err)
            }
        }
    }

    /// Submit the draft.
    ///
    /// An incomplete draft (no stars, blank field) is refused here, before
    /// the repository is contacted, and the editor stays ready. Remote
    /// refusals land the editor in the error phase; ownership of an
    /// edited review is the remote store's call.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an incomplete draft,
    /// `AppError::Auth` with `NotAuthenticated` when signed out,
    /// `AppError::Store` with `Forbidden` when editing someone else's
    /// review.
    pub async fn submit(&mut self) -> Result<Review> {
        // Validation pre-empts the network call; the editor stays Ready
        let _ = self.draft.validate()?;

        let identity = self
            .session
            .current_identity()
            .ok_or(AuthError::NotAuthenticated)?;

        self.phase = EditorPhase::Submitting;
        let result = match &self.mode {
            EditorMode::Create => self.reviews.create(&self.draft, &identity).await,
            EditorMode::Edit(id) => self.reviews.update(id, &self.draft, &identity).await,
        };

        match result {
            Ok(review) => {
                self.phase = EditorPhase::Done;
                Ok(review)
            }
            Err(err) => {
                self.phase = EditorPhase::Error;
                Err(err)
            }
        }
    }
}
