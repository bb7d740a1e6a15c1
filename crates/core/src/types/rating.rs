//! Star rating type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingError {
    /// The value is outside the 1-5 star range.
    #[error("rating must be between {min} and {max} stars (got {got})", min = Rating::MIN, max = Rating::MAX)]
    OutOfRange {
        /// The rejected value.
        got: u8,
    },
}

/// A star rating between 1 and 5 inclusive.
///
/// Construction is the only way to obtain a `Rating`, so a value outside
/// the valid range is unrepresentable. Deserialization re-validates, so
/// ratings arriving from the wire hold the same invariant.
///
/// ## Examples
///
/// ```
/// use foodiefinds_core::Rating;
///
/// assert_eq!(Rating::new(4).unwrap().value(), 4);
/// assert!(Rating::new(0).is_err());
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Minimum allowed rating.
    pub const MIN: u8 = 1;
    /// Maximum allowed rating.
    pub const MAX: u8 = 5;

    /// Create a new `Rating`.
    ///
    /// # Errors
    ///
    /// Returns `RatingError::OutOfRange` if `value` is not in `1..=5`.
    pub const fn new(value: u8) -> Result<Self, RatingError> {
        if value >= Self::MIN && value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(RatingError::OutOfRange { got: value })
        }
    }

    /// Get the underlying star count.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}
