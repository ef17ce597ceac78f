//! URL slug type.
//!
//! Products and categories are addressed by slug; uniqueness-by-slug is the
//! one invariant the catalog enforces, so slugs get a parsing type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input contains a character outside `[a-z0-9-]`.
    #[error("slug may only contain lowercase letters, digits, and hyphens (got {0:?})")]
    InvalidCharacter(char),
    /// The input starts or ends with a hyphen.
    #[error("slug cannot start or end with a hyphen")]
    EdgeHyphen,
}

/// A URL slug: non-empty, lowercase `[a-z0-9-]`, no edge hyphens.
///
/// ## Examples
///
/// ```
/// use coffeecorner_core::Slug;
///
/// assert!(Slug::parse("cold-brew").is_ok());
/// assert!(Slug::parse("Cold Brew").is_err());
/// assert!(Slug::parse("-espresso").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Parse a `Slug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains characters outside
    /// `[a-z0-9-]`, or starts/ends with a hyphen.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if let Some(bad) = s
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(SlugError::InvalidCharacter(bad));
        }

        if s.starts_with('-') || s.ends_with('-') {
            return Err(SlugError::EdgeHyphen);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_slugs() {
        assert!(Slug::parse("espresso").is_ok());
        assert!(Slug::parse("cold-brew").is_ok());
        assert!(Slug::parse("blueberry-muffin").is_ok());
        assert!(Slug::parse("item2").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Slug::parse(""), Err(SlugError::Empty)));
    }

    #[test]
    fn test_parse_rejects_uppercase_and_spaces() {
        assert!(matches!(
            Slug::parse("Cold Brew"),
            Err(SlugError::InvalidCharacter(_))
        ));
        assert!(matches!(
            Slug::parse("caf\u{e9}"),
            Err(SlugError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn test_parse_rejects_edge_hyphens() {
        assert!(matches!(Slug::parse("-espresso"), Err(SlugError::EdgeHyphen)));
        assert!(matches!(Slug::parse("espresso-"), Err(SlugError::EdgeHyphen)));
    }

    #[test]
    fn test_display_and_serde() {
        let slug = Slug::parse("iced-latte").unwrap();
        assert_eq!(format!("{slug}"), "iced-latte");
        assert_eq!(serde_json::to_string(&slug).unwrap(), "\"iced-latte\"");
    }
}
