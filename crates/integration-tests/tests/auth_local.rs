//! Integration tests for the local credential backend.
//!
//! The local store is the fallback when Contentstack is not configured:
//! users keyed by email in `users.json`, passwords as salted SHA-256
//! digests.

use coffeecorner_core::{AvatarId, Email};
use coffeecorner_integration_tests::temp_data_dir;
use coffeecorner_server::models::{MAX_PROFILES, StoredUser};
use coffeecorner_server::services::auth::{AuthError, AuthService};
use coffeecorner_server::storage::JsonStore;

fn open_store(label: &str) -> JsonStore<StoredUser> {
    JsonStore::open(temp_data_dir(label).join("users.json")).expect("user store opens")
}

#[tokio::test]
async fn test_signup_stores_salted_digest_not_password() {
    let store = open_store("digest");
    let auth = AuthService::local(store.clone());

    auth.sign_up("Jane", "jane@example.com", "password123")
        .await
        .expect("sign up succeeds");

    let stored = store.get("jane@example.com").expect("record exists");
    assert_ne!(stored.password_hash, "password123");
    assert!(!stored.password_hash.contains("password123"));
    assert_eq!(stored.password_hash.len(), 64, "hex SHA-256 digest");
    assert_eq!(stored.salt.len(), 32, "hex 16-byte salt");
}

#[tokio::test]
async fn test_email_is_the_store_key_and_case_insensitive() {
    let store = open_store("casing");
    let auth = AuthService::local(store.clone());

    auth.sign_up("Jane", "Jane@Example.COM", "password123")
        .await
        .expect("sign up succeeds");

    // Stored under the lowercased email
    assert!(store.contains("jane@example.com"));

    // Sign-in works regardless of email casing
    auth.sign_in("JANE@EXAMPLE.COM", "password123")
        .await
        .expect("sign in succeeds");

    // And the duplicate check is case-insensitive too
    let err = auth
        .sign_up("Jane 2", "JANE@example.com", "password456")
        .await
        .expect_err("duplicate rejected");
    assert!(matches!(err, AuthError::UserAlreadyExists));
}

#[tokio::test]
async fn test_accounts_survive_reopen() {
    let dir = temp_data_dir("restart");

    {
        let store: JsonStore<StoredUser> =
            JsonStore::open(dir.join("users.json")).expect("user store opens");
        let auth = AuthService::local(store);
        auth.sign_up("Jane", "jane@example.com", "password123")
            .await
            .expect("sign up succeeds");
    }

    let store: JsonStore<StoredUser> =
        JsonStore::open(dir.join("users.json")).expect("user store reopens");
    let auth = AuthService::local(store);

    let user = auth
        .sign_in("jane@example.com", "password123")
        .await
        .expect("sign in after reopen");
    assert_eq!(user.username, "Jane");
    assert!(user.last_login.is_some());
}

#[tokio::test]
async fn test_invalid_inputs_are_rejected() {
    let auth = AuthService::local(open_store("invalid"));

    assert!(matches!(
        auth.sign_up("Jane", "not-an-email", "password123").await,
        Err(AuthError::InvalidEmail(_))
    ));
    assert!(matches!(
        auth.sign_up("Jane", "jane@example.com", "short").await,
        Err(AuthError::WeakPassword(_))
    ));
}

#[tokio::test]
async fn test_profile_lifecycle() {
    let auth = AuthService::local(open_store("profiles"));
    let email = Email::parse("jane@example.com").expect("valid email");

    auth.sign_up("Jane", email.as_str(), "password123")
        .await
        .expect("sign up succeeds");

    // Profiles accumulate up to the limit
    for i in 0..MAX_PROFILES {
        auth.add_profile(&email, &format!("Profile {i}"), AvatarId::new("avatar_2"))
            .await
            .expect("profile created");
    }
    let err = auth
        .add_profile(&email, "Overflow", AvatarId::new("avatar_2"))
        .await
        .expect_err("limit enforced");
    assert!(matches!(err, AuthError::ProfileLimit(4)));

    // Profiles come back on the user record
    let user = auth
        .get_user(&email)
        .await
        .expect("lookup works")
        .expect("user exists");
    assert_eq!(user.profiles.len(), MAX_PROFILES);

    // And are addressable by uid
    let first = user.profiles.first().expect("has profiles");
    let found = auth
        .find_profile(&email, &first.uid)
        .await
        .expect("profile found");
    assert_eq!(found.name, "Profile 0");
}

#[tokio::test]
async fn test_unknown_user_profile_ops_fail() {
    let auth = AuthService::local(open_store("ghost"));
    let email = Email::parse("ghost@example.com").expect("valid email");

    let err = auth
        .add_profile(&email, "Nobody", AvatarId::new("avatar_1"))
        .await
        .expect_err("no account");
    assert!(matches!(err, AuthError::UserNotFound));
}
