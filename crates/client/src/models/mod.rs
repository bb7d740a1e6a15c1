//! Domain models for the client core.
//!
//! These types represent validated domain objects separate from the wire
//! rows the remote store returns; serde attributes pin the wire names.

pub mod favorite;
pub mod identity;
pub mod review;

pub use favorite::{Favorite, FavoriteDraft};
pub use identity::{DEFAULT_AVATAR_URL, Identity};
pub use review::{Review, ReviewDraft, ReviewPayload, ValidationError};
