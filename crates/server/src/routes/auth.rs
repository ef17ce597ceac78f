//! Authentication route handlers.
//!
//! Sign-up, sign-in, sign-out, and current-user lookup against the
//! configured credential backend.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::OptionalAuth;
use crate::middleware::session::remember_me_expiry;
use crate::models::{CurrentUser, Profile, User, session_keys};
use crate::services::auth::AuthError;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Sign-up form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

/// Response carrying the signed-in user.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
}

/// Response for the current-user endpoint.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: Option<User>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Create an account and sign the new user in.
#[instrument(skip(state, session, form))]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<SignupForm>,
) -> Result<Json<AuthResponse>> {
    let username = form.username.trim();
    if username.is_empty() {
        return Err(AppError::BadRequest("Username is required".to_string()));
    }

    let user = state
        .auth()
        .sign_up(username, &form.email, &form.password)
        .await
        .map_err(|e| match e {
            AuthError::Cms(err) => {
                tracing::error!(error = %err, "Sign up failed");
                AppError::Upstream("Failed to create account".to_string())
            }
            other => AppError::from(other),
        })?;

    let current = CurrentUser::from(&user);
    session.insert(session_keys::CURRENT_USER, &current).await?;
    set_sentry_user(&user.uid, Some(user.email.as_str()));

    Ok(Json(AuthResponse { user }))
}

/// Sign in with email and password.
///
/// "Remember me" extends the session to 7 days of inactivity; otherwise it
/// ends with the browser session.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<AuthResponse>> {
    let user = state
        .auth()
        .sign_in(&form.email, &form.password)
        .await
        .map_err(|e| match e {
            AuthError::Cms(err) => {
                tracing::error!(error = %err, "Sign in failed");
                AppError::Upstream("External service error".to_string())
            }
            other => AppError::from(other),
        })?;

    if form.remember_me {
        session.set_expiry(Some(remember_me_expiry()));
    }

    // A fresh login starts without a selected profile
    let _ = session
        .remove::<Profile>(session_keys::SELECTED_PROFILE)
        .await?;

    let current = CurrentUser::from(&user);
    session.insert(session_keys::CURRENT_USER, &current).await?;
    set_sentry_user(&user.uid, Some(user.email.as_str()));

    Ok(Json(AuthResponse { user }))
}

/// Sign out.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>> {
    let _ = session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    let _ = session
        .remove::<Profile>(session_keys::SELECTED_PROFILE)
        .await?;
    clear_sentry_user();

    Ok(Json(serde_json::json!({ "message": "Signed out" })))
}

/// Current user, `null` when signed out or when the account no longer exists.
#[instrument(skip(state, current))]
pub async fn me(
    State(state): State<AppState>,
    OptionalAuth(current): OptionalAuth,
) -> Result<Json<MeResponse>> {
    let user = match current {
        Some(current) => state.auth().get_user(&current.email).await?,
        None => None,
    };

    Ok(Json(MeResponse { user }))
}
