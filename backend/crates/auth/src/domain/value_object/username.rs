//! Username Value Object
//!
//! Public handle, unique across the marketplace. The canonical form
//! (NFKC + lowercase) is what uniqueness is enforced against so that
//! visually-identical handles cannot coexist.

use kernel::error::app_error::{AppError, AppResult};
use unicode_normalization::UnicodeNormalization;

const USERNAME_MIN_LENGTH: usize = 3;
const USERNAME_MAX_LENGTH: usize = 32;

/// Username value object (original display form + canonical form)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username {
    original: String,
    canonical: String,
}

impl Username {
    /// Create a new username with validation
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let original: String = raw.into().trim().nfkc().collect();

        let char_count = original.chars().count();
        if char_count < USERNAME_MIN_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be at least {} characters",
                USERNAME_MIN_LENGTH
            )));
        }
        if char_count > USERNAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be at most {} characters",
                USERNAME_MAX_LENGTH
            )));
        }

        let mut chars = original.chars();
        let first = chars.next().expect("length checked above");
        if !first.is_ascii_alphanumeric() {
            return Err(AppError::bad_request(
                "Username must start with a letter or digit",
            ));
        }
        if !original
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
        {
            return Err(AppError::bad_request(
                "Username may only contain letters, digits, '_', '-' and '.'",
            ));
        }

        let canonical = original.to_lowercase();
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Create from database values (assumed already validated)
    pub fn from_db(original: impl Into<String>) -> Self {
        let original = original.into();
        let canonical = original.to_lowercase();
        Self {
            original,
            canonical,
        }
    }

    /// Display form as entered at registration
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Canonical form used for uniqueness checks
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_valid() {
        assert!(Username::new("adaeze").is_ok());
        assert!(Username::new("seller_01").is_ok());
        assert!(Username::new("a.b-c").is_ok());
    }

    #[test]
    fn test_username_length_bounds() {
        assert!(Username::new("ab").is_err());
        assert!(Username::new("a".repeat(33)).is_err());
        assert!(Username::new("abc").is_ok());
    }

    #[test]
    fn test_username_charset() {
        assert!(Username::new("_leading").is_err());
        assert!(Username::new("has space").is_err());
        assert!(Username::new("semi;colon").is_err());
    }

    #[test]
    fn test_username_canonical_lowercase() {
        let name = Username::new("Adaeze_NG").unwrap();
        assert_eq!(name.original(), "Adaeze_NG");
        assert_eq!(name.canonical(), "adaeze_ng");
    }
}
