//! Profile route handlers.
//!
//! Profiles are ordering identities under one account (max 4), each with a
//! name and an avatar from the fixed set. The selected profile lives in the
//! session.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use coffeecorner_core::{AvatarId, ProfileUid};

use crate::catalog::Avatar;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Profile, session_keys};
use crate::services::auth::AuthError;
use crate::state::AppState;

/// Create-profile form data.
#[derive(Debug, Deserialize)]
pub struct CreateProfileForm {
    pub name: String,
    /// Avatar id; unknown or missing ids resolve to the default avatar.
    pub avatar: Option<AvatarId>,
}

/// Select-profile form data.
#[derive(Debug, Deserialize)]
pub struct SelectProfileForm {
    pub profile_uid: ProfileUid,
}

/// Profile listing with the session's current selection.
#[derive(Debug, Serialize)]
pub struct ProfilesResponse {
    pub profiles: Vec<Profile>,
    pub selected: Option<Profile>,
}

/// Response carrying a single profile.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Profile,
}

/// List the user's profiles and the current selection.
#[instrument(skip(state, session, user))]
pub async fn list(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Result<Json<ProfilesResponse>> {
    let account = state
        .auth()
        .get_user(&user.email)
        .await?
        .ok_or(AppError::Auth(AuthError::UserNotFound))?;

    let selected: Option<Profile> = session.get(session_keys::SELECTED_PROFILE).await?;

    Ok(Json(ProfilesResponse {
        profiles: account.profiles,
        selected,
    }))
}

/// The fixed avatar set.
pub async fn avatars(State(state): State<AppState>) -> Json<Vec<Avatar>> {
    Json(state.catalog().avatars().to_vec())
}

/// Create a profile and select it.
#[instrument(skip(state, session, user, form))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Json(form): Json<CreateProfileForm>,
) -> Result<Json<ProfileResponse>> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Profile name is required".to_string()));
    }

    let avatar = state
        .catalog()
        .avatar_or_default(&form.avatar.unwrap_or_else(|| AvatarId::new("")))
        .id
        .clone();

    let profile = state.auth().add_profile(&user.email, name, avatar).await?;

    session
        .insert(session_keys::SELECTED_PROFILE, &profile)
        .await?;

    Ok(Json(ProfileResponse { profile }))
}

/// Select one of the user's profiles.
#[instrument(skip(state, session, user, form))]
pub async fn select(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Json(form): Json<SelectProfileForm>,
) -> Result<Json<ProfileResponse>> {
    let profile = state
        .auth()
        .find_profile(&user.email, &form.profile_uid)
        .await?;

    session
        .insert(session_keys::SELECTED_PROFILE, &profile)
        .await?;

    Ok(Json(ProfileResponse { profile }))
}
