//! HTTP route handlers for the CoffeeCorner service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check
//!
//! # Auth
//! POST /auth/signup            - Create an account
//! POST /auth/login             - Sign in (optional remember_me)
//! POST /auth/logout            - Sign out
//! GET  /auth/me                - Current user (null when signed out)
//!
//! # Profiles (require auth)
//! GET  /profiles               - List profiles + current selection
//! POST /profiles               - Create a profile (max 4) and select it
//! POST /profiles/select        - Select a profile
//! GET  /profiles/avatars       - Fixed avatar set
//!
//! # Catalog
//! GET  /categories             - Category list
//! GET  /products               - Product list (?category=slug, ?featured=true)
//! GET  /products/{slug}        - Product detail
//! GET  /search                 - Catalog search (?q=)
//!
//! # Cart
//! GET  /cart                   - Current cart
//! POST /cart/add               - Add a product (increments existing lines)
//! POST /cart/update            - Set line quantity (below 1 removes)
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Item count
//!
//! # Checkout
//! POST /checkout               - Place the order, clear the cart
//!
//! # Assistant
//! POST /assistant              - Product assistant message
//! ```

pub mod assistant;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod products;
pub mod profiles;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profiles::list).post(profiles::create))
        .route("/select", post(profiles::select))
        .route("/avatars", get(profiles::avatars))
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(products::categories))
        .route("/products", get(products::list))
        .route("/products/{slug}", get(products::detail))
        .route("/search", get(search::search))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/profiles", profile_routes())
        .nest("/cart", cart_routes())
        .merge(catalog_routes())
        .route("/checkout", post(checkout::place_order))
        .route("/assistant", post(assistant::message))
}
