//! Checkout route handler.
//!
//! Order placement is a demo flow: validate, confirm, clear the cart. No
//! payment and no order persistence.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use coffeecorner_core::Email;

use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::models::CartItem;
use crate::services::cart::CartService;
use crate::state::AppState;

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub notes: Option<String>,
}

/// Order confirmation.
#[derive(Debug, Serialize)]
pub struct OrderConfirmation {
    pub reference: String,
    pub items: Vec<CartItem>,
    pub total: String,
    pub notes: Option<String>,
    pub placed_at: DateTime<Utc>,
    pub message: String,
}

/// Place the order and clear the cart.
#[instrument(skip(state, session, user, form))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Json(form): Json<CheckoutForm>,
) -> Result<Json<OrderConfirmation>> {
    let scope = super::cart::scope_for(&session, user.as_ref()).await?;
    let items = state.carts().items(&scope);

    if items.is_empty() {
        return Err(AppError::BadRequest("Your cart is empty".to_string()));
    }

    if form.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    Email::parse(&form.email)
        .map_err(|_| AppError::BadRequest("Invalid email address".to_string()))?;

    let total = CartService::total(&items).display();
    state.carts().clear(&scope)?;

    tracing::info!(lines = items.len(), total = %total, "Order placed");

    Ok(Json(OrderConfirmation {
        reference: Uuid::new_v4().to_string(),
        items,
        total,
        notes: form.notes,
        placed_at: Utc::now(),
        message: "Thank you for your order!".to_string(),
    }))
}
