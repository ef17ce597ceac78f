//! Local credential-store user management.
//!
//! # Usage
//!
//! ```bash
//! cc-cli user create -u "Jane" -e jane@example.com -p "a long password"
//! cc-cli user list
//! ```
//!
//! # Environment Variables
//!
//! - `COFFEECORNER_DATA_DIR` - Directory holding `users.json` (default: data)
//!
//! These commands go through the same `AuthService` the server uses, so
//! validation and hashing match exactly.

use std::path::PathBuf;

use thiserror::Error;

use coffeecorner_server::models::StoredUser;
use coffeecorner_server::services::auth::{AuthError, AuthService};
use coffeecorner_server::storage::{JsonStore, StorageError};

/// Errors that can occur during user commands.
#[derive(Debug, Error)]
pub enum UserCommandError {
    /// Store file could not be opened or written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Sign-up was rejected.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),
}

/// Resolve the data directory from the environment.
fn data_dir() -> PathBuf {
    dotenvy::dotenv().ok();
    PathBuf::from(std::env::var("COFFEECORNER_DATA_DIR").unwrap_or_else(|_| "data".to_owned()))
}

fn open_store() -> Result<JsonStore<StoredUser>, UserCommandError> {
    let dir = data_dir();
    std::fs::create_dir_all(&dir).map_err(StorageError::from)?;
    Ok(JsonStore::open(dir.join("users.json"))?)
}

/// Create a new user in the local credential store.
///
/// # Errors
///
/// Returns `UserCommandError` if the store cannot be opened or the sign-up
/// is rejected (duplicate email, weak password, invalid email).
pub async fn create(username: &str, email: &str, password: &str) -> Result<(), UserCommandError> {
    let auth = AuthService::local(open_store()?);

    let user = auth.sign_up(username, email, password).await?;
    tracing::info!(
        "User created: {} <{}> (uid {})",
        user.username,
        user.email,
        user.uid
    );

    Ok(())
}

/// List users in the local credential store.
///
/// # Errors
///
/// Returns `UserCommandError` if the store cannot be opened.
pub fn list() -> Result<(), UserCommandError> {
    let store = open_store()?;

    let mut users = store.values();
    if users.is_empty() {
        tracing::info!("No users in the local store");
        return Ok(());
    }

    users.sort_by_key(|u| u.created_on);
    tracing::info!("{} user(s):", users.len());
    for user in users {
        tracing::info!(
            "  {} <{}>  created {}  profiles {}",
            user.username,
            user.email,
            user.created_on.format("%Y-%m-%d"),
            user.profiles.len()
        );
    }

    Ok(())
}
