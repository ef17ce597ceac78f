//! Cart route handlers.
//!
//! Carts are keyed by a storage scope: signed-in users get a per-user key
//! (the cart follows them across sessions), anonymous visitors get a
//! per-session key minted on first use.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use coffeecorner_core::ProductUid;

use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::models::{CartItem, CurrentUser, session_keys};
use crate::services::cart::{CartMutation, CartService};
use crate::state::AppState;

/// Prefix shared by all cart storage keys.
const CART_SCOPE_PREFIX: &str = "coffeecorner_cart";

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub count: u32,
    pub subtotal: String,
}

impl From<&[CartItem]> for CartView {
    fn from(items: &[CartItem]) -> Self {
        Self {
            count: CartService::count(items),
            subtotal: CartService::total(items).display(),
            items: items.to_vec(),
        }
    }
}

/// Response carrying the cart and an optional toast-style message.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: CartView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<CartMutation> for CartResponse {
    fn from(mutation: CartMutation) -> Self {
        Self {
            cart: CartView::from(mutation.items.as_slice()),
            message: mutation.message,
        }
    }
}

/// Add-to-cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_uid: ProductUid,
    pub quantity: Option<u32>,
}

/// Update-quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_uid: ProductUid,
    pub quantity: u32,
}

/// Remove-from-cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_uid: ProductUid,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Resolve the cart storage scope for this request.
///
/// Signed-in users share one cart across sessions; anonymous sessions mint a
/// scope key on first use and keep it in the session. Also used by checkout.
pub async fn scope_for(session: &Session, user: Option<&CurrentUser>) -> Result<String> {
    if let Some(user) = user {
        return Ok(format!("{CART_SCOPE_PREFIX}_{}", user.uid));
    }

    if let Some(scope) = session.get::<String>(session_keys::CART_SCOPE).await? {
        return Ok(scope);
    }

    let scope = format!("{CART_SCOPE_PREFIX}_anon_{}", Uuid::new_v4());
    session.insert(session_keys::CART_SCOPE, &scope).await?;
    Ok(scope)
}

// =============================================================================
// Handlers
// =============================================================================

/// Current cart.
#[instrument(skip(state, session, user))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
) -> Result<Json<CartResponse>> {
    let scope = scope_for(&session, user.as_ref()).await?;
    let items = state.carts().items(&scope);

    Ok(Json(CartResponse {
        cart: CartView::from(items.as_slice()),
        message: None,
    }))
}

/// Add a product to the cart.
///
/// An existing line has its quantity incremented.
#[instrument(skip(state, session, user))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Json(form): Json<AddToCartForm>,
) -> Result<Json<CartResponse>> {
    let product = state
        .catalog()
        .product_by_uid(&form.product_uid)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Product not found: {}", form.product_uid)))?;

    let scope = scope_for(&session, user.as_ref()).await?;
    let mutation = state
        .carts()
        .add(&scope, product, form.quantity.unwrap_or(1))?;

    Ok(Json(CartResponse::from(mutation)))
}

/// Set a line's quantity; below 1 removes the line.
#[instrument(skip(state, session, user))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Json(form): Json<UpdateCartForm>,
) -> Result<Json<CartResponse>> {
    let scope = scope_for(&session, user.as_ref()).await?;
    let mutation = state
        .carts()
        .set_quantity(&scope, &form.product_uid, form.quantity)?;

    Ok(Json(CartResponse::from(mutation)))
}

/// Remove a line from the cart.
#[instrument(skip(state, session, user))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Json(form): Json<RemoveFromCartForm>,
) -> Result<Json<CartResponse>> {
    let scope = scope_for(&session, user.as_ref()).await?;
    let mutation = state.carts().remove(&scope, &form.product_uid)?;

    Ok(Json(CartResponse::from(mutation)))
}

/// Empty the cart.
#[instrument(skip(state, session, user))]
pub async fn clear(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
) -> Result<Json<CartResponse>> {
    let scope = scope_for(&session, user.as_ref()).await?;
    let mutation = state.carts().clear(&scope)?;

    Ok(Json(CartResponse::from(mutation)))
}

/// Cart item count.
#[instrument(skip(state, session, user))]
pub async fn count(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
) -> Result<Json<serde_json::Value>> {
    let scope = scope_for(&session, user.as_ref()).await?;
    let items = state.carts().items(&scope);

    Ok(Json(
        serde_json::json!({ "count": CartService::count(&items) }),
    ))
}
