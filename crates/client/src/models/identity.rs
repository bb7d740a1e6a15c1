//! Authenticated identity types.

use serde::{Deserialize, Serialize};

use foodiefinds_core::Email;

/// Avatar shown for members who never set a photo.
pub const DEFAULT_AVATAR_URL: &str = "https://i.ibb.co/0jZ1Z1Z/default-avatar.png";

/// The authenticated principal and its display attributes.
///
/// An `Identity` only exists while a session is established: the
/// [`SessionStore`](crate::session::SessionStore) slot holds
/// `Some(Identity)` when authenticated and `None` otherwise, so an
/// `Identity` value in hand is proof of an authenticated session. The
/// email is the stable owner key for reviews and favorites.
///
/// This type also doubles as the durable profile snapshot sent to
/// `POST /api/users`, which stores exactly these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Stable, unique member key.
    pub email: Email,
    /// Name shown next to the member's reviews.
    pub display_name: String,
    /// Avatar URI.
    #[serde(rename = "photoURL")]
    pub photo_url: String,
}

impl Identity {
    /// Create an identity, falling back to the default avatar when no
    /// photo was supplied.
    #[must_use]
    pub fn new(email: Email, display_name: impl Into<String>, photo_url: Option<String>) -> Self {
        Self {
            email,
            display_name: display_name.into(),
            photo_url: photo_url.unwrap_or_else(|| DEFAULT_AVATAR_URL.to_owned()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email::parse("member@example.com").unwrap()
    }

    #[test]
    fn test_new_with_photo() {
        let identity = Identity::new(email(), "Sam", Some("https://pic.example/s.png".into()));
        assert_eq!(identity.photo_url, "https://pic.example/s.png");
    }

    #[test]
    fn test_new_defaults_avatar() {
        let identity = Identity::new(email(), "Sam", None);
        assert_eq!(identity.photo_url, DEFAULT_AVATAR_URL);
    }

    #[test]
    fn test_wire_names() {
        let identity = Identity::new(email(), "Sam", None);
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["email"], "member@example.com");
        assert_eq!(json["displayName"], "Sam");
        assert_eq!(json["photoURL"], DEFAULT_AVATAR_URL);
    }
}
