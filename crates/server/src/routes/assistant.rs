//! Assistant route handler.
//!
//! Local rules answer from the catalog; anything else goes through the
//! fallback chain (automations endpoint, then the static fallback text).
//! The last product described is kept in the session so "similar" works.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use coffeecorner_core::ProductUid;

use crate::assistant::{self, FALLBACK_TEXT};
use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;

/// Assistant message form data.
#[derive(Debug, Deserialize)]
pub struct AssistantForm {
    pub message: String,
}

/// Assistant reply.
#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    pub reply: String,
}

/// Answer a message.
#[instrument(skip(state, session, form))]
pub async fn message(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<AssistantForm>,
) -> Result<Json<AssistantResponse>> {
    let message = form.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("Message is required".to_string()));
    }

    let catalog = state.catalog();

    if assistant::handles_locally(catalog, message) {
        let last_uid: Option<ProductUid> =
            session.get(session_keys::ASSISTANT_LAST_PRODUCT).await?;
        let last_viewed = last_uid.as_ref().and_then(|uid| catalog.product_by_uid(uid));

        let reply = assistant::respond(catalog, last_viewed, message);
        if let Some(uid) = &reply.last_viewed {
            session
                .insert(session_keys::ASSISTANT_LAST_PRODUCT, uid)
                .await?;
        }

        return Ok(Json(AssistantResponse { reply: reply.text }));
    }

    // Fallback chain: automations endpoint, then the static text
    let reply = match state.automations() {
        Some(client) => match client.complete(message).await {
            Ok(Some(text)) => text,
            Ok(None) => FALLBACK_TEXT.to_owned(),
            Err(e) => {
                tracing::warn!(error = %e, "Automations fallback failed");
                FALLBACK_TEXT.to_owned()
            }
        },
        None => FALLBACK_TEXT.to_owned(),
    };

    Ok(Json(AssistantResponse { reply }))
}
