//! Authentication error types.

use thiserror::Error;

use crate::cms::CmsError;
use crate::services::crypto::CryptoError;
use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] coffeecorner_core::EmailError),

    /// Invalid credentials (wrong password or no such account).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No account for the given email (profile operations only; sign-in
    /// folds this into `InvalidCredentials`).
    #[error("user not found")]
    UserNotFound,

    /// An account with this email already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Profile limit reached.
    #[error("maximum {0} profiles allowed")]
    ProfileLimit(usize),

    /// Profile not found on the user.
    #[error("profile not found")]
    ProfileNotFound,

    /// CMS record-store error.
    #[error("cms error: {0}")]
    Cms(#[from] CmsError),

    /// Local store error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Password encryption error.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
