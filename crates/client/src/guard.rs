//! Navigation gate for session-only views.
//!
//! Stateless: `authorize` is re-evaluated on every navigation attempt.
//! On redirect, the originally requested path rides along so the caller
//! can resume it after a successful sign-in.

use crate::models::Identity;

/// Path of the sign-in view redirects point at.
pub const LOGIN_PATH: &str = "/login";

/// Exactly-matched gated paths.
const GATED_PATHS: &[&str] = &["/add-review", "/my-reviews", "/my-favorites"];

/// Prefix-matched gated paths (the edit view carries a review id).
const GATED_PREFIXES: &[&str] = &["/update-review/"];

/// Outcome of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Navigation may proceed.
    Allow,
    /// Caller must navigate to `redirect_to`, then resume `resume_path`
    /// once a session is established.
    Redirect {
        redirect_to: &'static str,
        resume_path: String,
    },
}

/// Decide whether `requested_path` may be shown for `identity`.
///
/// Gated paths require an authenticated identity; everything else is
/// always allowed.
#[must_use]
pub fn authorize(requested_path: &str, identity: Option<&Identity>) -> AccessDecision {
    if identity.is_some() || !is_gated(requested_path) {
        AccessDecision::Allow
    } else {
        AccessDecision::Redirect {
            redirect_to: LOGIN_PATH,
            resume_path: requested_path.to_string(),
        }
    }
}

/// Whether a path belongs to the fixed gated set.
#[must_use]
pub fn is_gated(path: &str) -> bool {
    GATED_PATHS.contains(&path) || GATED_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}
