//! User domain types.
//!
//! `User` is what the API returns; credential material stays in the backend
//! records (`StoredUser` for the local store, CMS entries for Contentstack).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coffeecorner_core::{AvatarId, Email, ProfileUid, UserUid};

/// Maximum number of profiles per user.
pub const MAX_PROFILES: usize = 4;

/// An ordering profile under a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique profile uid.
    pub uid: ProfileUid,
    /// Display name shown on the profile picker.
    pub name: String,
    /// Avatar id from the fixed avatar set.
    pub avatar: AvatarId,
}

/// A CoffeeCorner user (domain type).
///
/// Never carries credential material.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user uid.
    pub uid: UserUid,
    /// Display username.
    pub username: String,
    /// User's email address.
    pub email: Email,
    /// When the account was created.
    pub created_on: DateTime<Utc>,
    /// When the user last signed in.
    pub last_login: Option<DateTime<Utc>>,
    /// Ordering profiles (at most [`MAX_PROFILES`]).
    pub profiles: Vec<Profile>,
}

/// A local credential-store record, keyed by email.
///
/// The password is stored as a hex SHA-256 digest of `salt + password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    pub uid: UserUid,
    pub username: String,
    pub email: Email,
    pub password_hash: String,
    pub salt: String,
    pub created_on: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl From<&StoredUser> for User {
    fn from(stored: &StoredUser) -> Self {
        Self {
            uid: stored.uid.clone(),
            username: stored.username.clone(),
            email: stored.email.clone(),
            created_on: stored.created_on,
            last_login: stored.last_login,
            profiles: stored.profiles.clone(),
        }
    }
}
