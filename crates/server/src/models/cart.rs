//! Cart types.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// A cart line: product snapshot plus quantity.
///
/// The snapshot keeps the line self-contained in the persisted store; the
/// quantity is always at least 1 (a line that would drop below 1 is removed
/// instead).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}
