//! Wire types for the Contentstack `signup_user` content type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Profile;

/// Writable fields of a `signup_user` entry.
///
/// Updates PUT the full record back, so this struct is both the create body
/// and the update body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsUserFields {
    /// Entry title: username lowercased, whitespace collapsed to `_`.
    pub title: String,
    pub username: String,
    pub email: String,
    /// AES-encrypted password. The Delivery API may omit this field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub created_on: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<Profile>,
}

impl CmsUserFields {
    /// Derive the entry title from a username.
    #[must_use]
    pub fn title_for(username: &str) -> String {
        username
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
    }
}

/// A `signup_user` entry as returned by the APIs.
#[derive(Debug, Clone, Deserialize)]
pub struct CmsUserEntry {
    pub uid: String,
    #[serde(flatten)]
    pub fields: CmsUserFields,
    /// Entry version, required by the publish payload when present.
    #[serde(rename = "_version", default)]
    pub version: Option<i64>,
}

/// Envelope for entry-collection responses.
#[derive(Debug, Deserialize)]
pub struct EntriesEnvelope {
    #[serde(default)]
    pub entries: Vec<CmsUserEntry>,
}

/// Envelope for single-entry responses.
#[derive(Debug, Deserialize)]
pub struct EntryEnvelope {
    pub entry: CmsUserEntry,
}

/// Error body shape returned by both APIs.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_title_for_collapses_whitespace() {
        assert_eq!(CmsUserFields::title_for("Jane Doe"), "jane_doe");
        assert_eq!(CmsUserFields::title_for("  Jane   Q  Doe "), "jane_q_doe");
        assert_eq!(CmsUserFields::title_for("solo"), "solo");
    }

    #[test]
    fn test_entry_deserializes_with_flattened_fields() {
        let json = serde_json::json!({
            "uid": "blt123",
            "title": "jane_doe",
            "username": "Jane Doe",
            "email": "jane@example.com",
            "password": "ZW5jcnlwdGVk",
            "created_on": "2026-01-15T09:30:00Z",
            "_version": 3
        });

        let entry: CmsUserEntry = serde_json::from_value(json).unwrap();
        assert_eq!(entry.uid, "blt123");
        assert_eq!(entry.fields.username, "Jane Doe");
        assert_eq!(entry.fields.password.as_deref(), Some("ZW5jcnlwdGVk"));
        assert_eq!(entry.version, Some(3));
        assert!(entry.fields.profiles.is_empty());
    }

    #[test]
    fn test_entry_without_password_or_version() {
        // Delivery responses may omit the password field entirely
        let json = serde_json::json!({
            "uid": "blt456",
            "title": "sam",
            "username": "sam",
            "email": "sam@example.com",
            "created_on": "2026-02-01T12:00:00Z"
        });

        let entry: CmsUserEntry = serde_json::from_value(json).unwrap();
        assert!(entry.fields.password.is_none());
        assert!(entry.version.is_none());
    }
}
