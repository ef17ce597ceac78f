//! Authentication service.
//!
//! Two interchangeable credential backends behind one service, selected by
//! configuration presence: the Contentstack record store (passwords held
//! AES-encrypted in entries) or the local JSON store (salted SHA-256
//! digests). Every sign-in mismatch - unknown email, missing password field,
//! failed decryption, digest mismatch - surfaces as the same
//! `InvalidCredentials`, so the API never distinguishes "no such account"
//! from "wrong password".

mod error;

pub use error::AuthError;

use chrono::Utc;
use uuid::Uuid;

use coffeecorner_core::{AvatarId, Email, ProfileUid, UserUid};

use crate::cms::{CmsClient, CmsUserEntry, CmsUserFields};
use crate::models::user::{MAX_PROFILES, Profile, StoredUser, User};
use crate::services::crypto::{self, PasswordCipher};
use crate::storage::JsonStore;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
///
/// Handles sign-up, sign-in, and profile management against the configured
/// credential backend.
#[derive(Clone)]
pub struct AuthService {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Cms {
        client: CmsClient,
        cipher: PasswordCipher,
    },
    Local {
        store: JsonStore<StoredUser>,
    },
}

impl AuthService {
    /// Create a service backed by the Contentstack record store.
    #[must_use]
    pub const fn cms(client: CmsClient, cipher: PasswordCipher) -> Self {
        Self {
            backend: Backend::Cms { client, cipher },
        }
    }

    /// Create a service backed by the local JSON store.
    #[must_use]
    pub const fn local(store: JsonStore<StoredUser>) -> Self {
        Self {
            backend: Backend::Local { store },
        }
    }

    /// Name of the active backend, for startup logging.
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match &self.backend {
            Backend::Cms { .. } => "contentstack",
            Backend::Local { .. } => "local",
        }
    }

    /// Register a new user.
    ///
    /// Checks email uniqueness before insert.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn sign_up(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        match &self.backend {
            Backend::Cms { client, cipher } => {
                // A lookup failure here must not block sign-up; the create
                // below still enforces uniqueness on the stack side
                let exists = client
                    .email_exists(email.as_str())
                    .await
                    .unwrap_or_else(|e| {
                        tracing::warn!(error = %e, "Email uniqueness check failed");
                        false
                    });
                if exists {
                    return Err(AuthError::UserAlreadyExists);
                }

                let encrypted = cipher.encrypt(password)?;
                let fields = CmsUserFields {
                    title: CmsUserFields::title_for(username),
                    username: username.to_owned(),
                    email: email.as_str().to_owned(),
                    password: Some(encrypted),
                    created_on: Utc::now(),
                    last_login: None,
                    profiles: Vec::new(),
                };

                tracing::info!(username, email = %email, "Creating user account");
                let entry = client.create_user(&fields).await?;
                user_from_entry(entry)
            }
            Backend::Local { store } => {
                if store.contains(email.as_str()) {
                    return Err(AuthError::UserAlreadyExists);
                }

                let salt = crypto::generate_salt();
                let password_hash = crypto::hash_password(password, &salt);
                let stored = StoredUser {
                    uid: UserUid::new(Uuid::new_v4().to_string()),
                    username: username.to_owned(),
                    email: email.clone(),
                    password_hash,
                    salt,
                    created_on: Utc::now(),
                    last_login: None,
                    profiles: Vec::new(),
                };
                store.insert(email.as_str(), stored.clone())?;

                tracing::info!(email = %email, "User account created in local store");
                Ok(User::from(&stored))
            }
        }
    }

    /// Sign in with email and password.
    ///
    /// Records the sign-in time; on the CMS backend this is best-effort (a
    /// failed update is logged, never surfaced).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on any mismatch.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        let now = Utc::now();

        match &self.backend {
            Backend::Cms { client, cipher } => {
                let entry = client
                    .find_by_email(email.as_str())
                    .await?
                    .ok_or(AuthError::InvalidCredentials)?;

                let Some(stored) = entry.fields.password.as_deref() else {
                    tracing::error!(
                        "Sign-in: password not available from API (check field visibility)"
                    );
                    return Err(AuthError::InvalidCredentials);
                };

                let decrypted = cipher.decrypt(stored).ok_or(AuthError::InvalidCredentials)?;
                if decrypted != password {
                    return Err(AuthError::InvalidCredentials);
                }

                if client.has_management_token() {
                    let mut fields = entry.fields.clone();
                    fields.last_login = Some(now);
                    if let Err(e) = client.update_user(&entry.uid, &fields).await {
                        tracing::warn!(error = %e, "Failed to update last login");
                    }
                }

                let mut user = user_from_entry(entry)?;
                user.last_login = Some(now);
                tracing::info!(email = %user.email, "Sign in successful");
                Ok(user)
            }
            Backend::Local { store } => {
                let mut stored = store
                    .get(email.as_str())
                    .ok_or(AuthError::InvalidCredentials)?;

                if crypto::hash_password(password, &stored.salt) != stored.password_hash {
                    return Err(AuthError::InvalidCredentials);
                }

                stored.last_login = Some(now);
                store.insert(email.as_str(), stored.clone())?;

                tracing::info!(email = %stored.email, "Sign in successful");
                Ok(User::from(&stored))
            }
        }
    }

    /// Fetch a user by email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the backend lookup fails.
    pub async fn get_user(&self, email: &Email) -> Result<Option<User>, AuthError> {
        match &self.backend {
            Backend::Cms { client, .. } => match client.find_by_email(email.as_str()).await? {
                Some(entry) => Ok(Some(user_from_entry(entry)?)),
                None => Ok(None),
            },
            Backend::Local { store } => {
                Ok(store.get(email.as_str()).map(|stored| User::from(&stored)))
            }
        }
    }

    /// Add an ordering profile to a user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ProfileLimit` when the user already has
    /// [`MAX_PROFILES`] profiles, `AuthError::UserNotFound` when the account
    /// is gone.
    pub async fn add_profile(
        &self,
        email: &Email,
        name: &str,
        avatar: AvatarId,
    ) -> Result<Profile, AuthError> {
        let profile = Profile {
            uid: ProfileUid::new(Uuid::new_v4().to_string()),
            name: name.to_owned(),
            avatar,
        };

        match &self.backend {
            Backend::Cms { client, .. } => {
                let entry = client
                    .find_by_email(email.as_str())
                    .await?
                    .ok_or(AuthError::UserNotFound)?;

                if entry.fields.profiles.len() >= MAX_PROFILES {
                    return Err(AuthError::ProfileLimit(MAX_PROFILES));
                }

                let mut fields = entry.fields.clone();
                fields.profiles.push(profile.clone());
                client.update_user(&entry.uid, &fields).await?;
            }
            Backend::Local { store } => {
                let mut stored = store
                    .get(email.as_str())
                    .ok_or(AuthError::UserNotFound)?;

                if stored.profiles.len() >= MAX_PROFILES {
                    return Err(AuthError::ProfileLimit(MAX_PROFILES));
                }

                stored.profiles.push(profile.clone());
                store.insert(email.as_str(), stored)?;
            }
        }

        tracing::info!(email = %email, profile = %profile.name, "Profile created");
        Ok(profile)
    }

    /// Look up one of a user's profiles by uid.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ProfileNotFound` when the profile isn't on the
    /// user, `AuthError::UserNotFound` when the account is gone.
    pub async fn find_profile(
        &self,
        email: &Email,
        profile_uid: &ProfileUid,
    ) -> Result<Profile, AuthError> {
        let user = self
            .get_user(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        user.profiles
            .into_iter()
            .find(|p| &p.uid == profile_uid)
            .ok_or(AuthError::ProfileNotFound)
    }
}

/// Map a CMS entry onto the domain user type.
fn user_from_entry(entry: CmsUserEntry) -> Result<User, AuthError> {
    Ok(User {
        uid: UserUid::new(entry.uid),
        username: entry.fields.username,
        email: Email::parse(&entry.fields.email)?,
        created_on: entry.fields.created_on,
        last_login: entry.fields.last_login,
        profiles: entry.fields.profiles,
    })
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_service() -> AuthService {
        let dir = std::env::temp_dir().join(format!("cc-auth-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let store = JsonStore::open(dir.join("users.json")).unwrap();
        AuthService::local(store)
    }

    #[tokio::test]
    async fn test_sign_up_and_sign_in() {
        let auth = temp_service();

        let user = auth
            .sign_up("Jane", "jane@example.com", "password123")
            .await
            .unwrap();
        assert_eq!(user.username, "Jane");
        assert!(user.last_login.is_none());

        let signed_in = auth
            .sign_in("jane@example.com", "password123")
            .await
            .unwrap();
        assert_eq!(signed_in.uid, user.uid);
        assert!(signed_in.last_login.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let auth = temp_service();
        auth.sign_up("Jane", "jane@example.com", "password123")
            .await
            .unwrap();

        let err = auth
            .sign_up("Other Jane", "jane@example.com", "different-pw")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserAlreadyExists));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
        let auth = temp_service();
        auth.sign_up("Jane", "jane@example.com", "password123")
            .await
            .unwrap();

        let wrong_pw = auth.sign_in("jane@example.com", "nope-nope").await;
        let no_user = auth.sign_in("ghost@example.com", "password123").await;

        assert!(matches!(wrong_pw, Err(AuthError::InvalidCredentials)));
        assert!(matches!(no_user, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let auth = temp_service();
        let err = auth
            .sign_up("Jane", "jane@example.com", "short")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword(_)));
    }

    #[tokio::test]
    async fn test_profile_limit() {
        let auth = temp_service();
        let email = Email::parse("jane@example.com").unwrap();
        auth.sign_up("Jane", email.as_str(), "password123")
            .await
            .unwrap();

        for i in 0..MAX_PROFILES {
            auth.add_profile(&email, &format!("Profile {i}"), AvatarId::new("avatar_1"))
                .await
                .unwrap();
        }

        let err = auth
            .add_profile(&email, "One too many", AvatarId::new("avatar_2"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::ProfileLimit(n) if n == MAX_PROFILES));
    }

    #[tokio::test]
    async fn test_find_profile() {
        let auth = temp_service();
        let email = Email::parse("jane@example.com").unwrap();
        auth.sign_up("Jane", email.as_str(), "password123")
            .await
            .unwrap();

        let created = auth
            .add_profile(&email, "Weekend", AvatarId::new("avatar_3"))
            .await
            .unwrap();

        let found = auth.find_profile(&email, &created.uid).await.unwrap();
        assert_eq!(found, created);

        let missing = auth
            .find_profile(&email, &ProfileUid::new("nope"))
            .await;
        assert!(matches!(missing, Err(AuthError::ProfileNotFound)));
    }
}
