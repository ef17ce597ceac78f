//! Integration tests for CoffeeCorner.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p coffeecorner-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `assistant_intents` - Rule dispatch and reply content of the assistant
//! - `cart_flow` - Cart mutations, totals, and persistence
//! - `auth_local` - Local-backend sign-up/sign-in and profile management
//!
//! All tests run in-process against the library surface: no network, no
//! running server. The CMS backend's wire types are covered by unit tests in
//! the server crate; exercising the live Contentstack APIs is out of scope
//! here.

use std::path::PathBuf;

/// Create a unique temp directory for a test's stores.
#[must_use]
pub fn temp_data_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cc-it-{label}-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("temp dir is creatable");
    dir
}
