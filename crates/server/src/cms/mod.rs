//! Contentstack record-store client.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest` against the Delivery and Management APIs
//! - Contentstack is the source of truth for CMS-backed accounts - no local
//!   sync, direct API calls
//! - Single content type (`signup_user`), locale `en-us`
//!
//! # APIs
//!
//! ## Delivery API
//! - Published entry reads (`api_key` + `access_token` headers)
//! - Often omits the password field, so reads prefer the Management API
//!
//! ## Management API
//! - Full entry reads, create, update, publish (`api_key` + `authorization`)
//! - Optional: without a management token the backend is read-only against
//!   published entries

mod client;
mod types;

pub use client::CmsClient;
pub use types::{CmsUserEntry, CmsUserFields};

use thiserror::Error;

/// Errors that can occur when interacting with the Contentstack APIs.
#[derive(Debug, Error)]
pub enum CmsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error response.
    #[error("Contentstack error ({status}): {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The operation needs the Management API but no token is configured.
    #[error("management token required for this operation")]
    ManagementTokenRequired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cms_error_display() {
        let err = CmsError::Api {
            status: 422,
            message: "Email already exists".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Contentstack error (422): Email already exists"
        );

        assert_eq!(
            CmsError::ManagementTokenRequired.to_string(),
            "management token required for this operation"
        );
    }
}
