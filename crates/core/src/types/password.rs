//! Password type with policy validation.

use core::fmt;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Errors that can occur when parsing a [`Password`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// The password is shorter than the minimum length.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    TooShort,
    /// The password has no uppercase letter.
    #[error("password must include at least one uppercase letter")]
    MissingUppercase,
    /// The password has no lowercase letter.
    #[error("password must include at least one lowercase letter")]
    MissingLowercase,
}

/// A password that satisfies the sign-up policy.
///
/// Policy: at least 6 characters, with at least one uppercase and one
/// lowercase letter. Parsing is the only way to construct one, so every
/// `Password` handed to the identity provider already passed the policy.
///
/// The inner value never appears in `Debug` output.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    /// Parse a `Password` from a string, enforcing the policy.
    ///
    /// # Errors
    ///
    /// Returns `PasswordError::TooShort` if shorter than 6 characters,
    /// `PasswordError::MissingUppercase` / `MissingLowercase` if either
    /// letter class is absent.
    pub fn parse(s: &str) -> Result<Self, PasswordError> {
        if s.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort);
        }
        if !s.chars().any(char::is_uppercase) {
            return Err(PasswordError::MissingUppercase);
        }
        if !s.chars().any(char::is_lowercase) {
            return Err(PasswordError::MissingLowercase);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the password as a string slice.
    ///
    /// Only the identity-provider boundary should call this.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Password::parse("Abc123").is_ok());
        assert!(Password::parse("supersecretP").is_ok());
    }

    #[test]
    fn test_parse_too_short() {
        assert_eq!(Password::parse("Ab1").unwrap_err(), PasswordError::TooShort);
        assert_eq!(Password::parse("").unwrap_err(), PasswordError::TooShort);
    }

    #[test]
    fn test_parse_missing_uppercase() {
        assert_eq!(
            Password::parse("abc123").unwrap_err(),
            PasswordError::MissingUppercase
        );
    }

    #[test]
    fn test_parse_missing_lowercase() {
        assert_eq!(
            Password::parse("ABC123").unwrap_err(),
            PasswordError::MissingLowercase
        );
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        // 6 two-byte characters plus the required letter classes
        assert!(Password::parse("Ááééíí").is_ok());
    }

    #[test]
    fn test_debug_redacts() {
        let password = Password::parse("Abc123").unwrap();
        assert_eq!(format!("{password:?}"), "Password([REDACTED])");
    }

    #[test]
    fn test_expose_returns_original() {
        let password = Password::parse("Abc123").unwrap();
        assert_eq!(password.expose(), "Abc123");
    }
}
