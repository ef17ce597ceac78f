//! Domain types.

pub mod cart;
pub mod session;
pub mod user;

pub use cart::CartItem;
pub use session::{CurrentUser, session_keys};
pub use user::{MAX_PROFILES, Profile, StoredUser, User};
