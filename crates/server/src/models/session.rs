//! Session-related types.
//!
//! Types stored in the session for authentication and cart state.

use serde::{Deserialize, Serialize};

use coffeecorner_core::{Email, UserUid};

use crate::models::user::User;

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's uid.
    pub uid: UserUid,
    /// User's email address (the credential-store key).
    pub email: Email,
    /// Display username.
    pub username: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            uid: user.uid.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
        }
    }
}

/// Session keys, documented as a collaborator contract.
pub mod session_keys {
    /// Key for storing the current signed-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the selected ordering profile.
    pub const SELECTED_PROFILE: &str = "selected_profile";

    /// Key for the anonymous cart storage scope.
    pub const CART_SCOPE: &str = "cart_scope";

    /// Key for the product last described by the assistant.
    pub const ASSISTANT_LAST_PRODUCT: &str = "assistant_last_product";
}
