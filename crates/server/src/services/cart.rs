//! Cart manager.
//!
//! The in-memory cart list is reconciled with the persisted store on every
//! mutation. Carts are keyed by a storage scope (per-user or per-anonymous-
//! session); concurrent writers to the same scope are last-write-wins, the
//! same contract as the browser storage this models.

use rust_decimal::Decimal;

use coffeecorner_core::{CurrencyCode, Price, ProductUid};

use crate::catalog::Product;
use crate::models::cart::CartItem;
use crate::storage::{JsonStore, StorageError};

/// Result of a cart mutation: the new cart plus a toast-style message.
#[derive(Debug, Clone)]
pub struct CartMutation {
    pub items: Vec<CartItem>,
    pub message: Option<String>,
}

/// Cart service over the persisted cart store.
#[derive(Clone)]
pub struct CartService {
    store: JsonStore<Vec<CartItem>>,
}

impl CartService {
    /// Create a cart service over an opened store.
    #[must_use]
    pub const fn new(store: JsonStore<Vec<CartItem>>) -> Self {
        Self { store }
    }

    /// Current cart for a scope (empty if none was ever saved).
    #[must_use]
    pub fn items(&self, scope: &str) -> Vec<CartItem> {
        self.store.get(scope).unwrap_or_default()
    }

    /// Add a product to the cart.
    ///
    /// An existing line has its quantity incremented; a new line is appended
    /// with quantity clamped to at least 1.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub fn add(
        &self,
        scope: &str,
        product: Product,
        quantity: u32,
    ) -> Result<CartMutation, StorageError> {
        let mut items = self.items(scope);
        let title = product.title.clone();

        match items.iter_mut().find(|item| item.product.uid == product.uid) {
            Some(line) => line.quantity += quantity,
            None => items.push(CartItem {
                product,
                quantity: quantity.max(1),
            }),
        }

        self.store.insert(scope, items.clone())?;
        Ok(CartMutation {
            items,
            message: Some(format!("\"{title}\" added to cart")),
        })
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub fn remove(&self, scope: &str, uid: &ProductUid) -> Result<CartMutation, StorageError> {
        let mut items = self.items(scope);
        let removed_title = items
            .iter()
            .find(|item| &item.product.uid == uid)
            .map(|item| item.product.title.clone());

        items.retain(|item| &item.product.uid != uid);
        self.store.insert(scope, items.clone())?;

        Ok(CartMutation {
            items,
            message: removed_title.map(|title| format!("\"{title}\" removed from cart")),
        })
    }

    /// Set a line's quantity; below 1 removes the line instead.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub fn set_quantity(
        &self,
        scope: &str,
        uid: &ProductUid,
        quantity: u32,
    ) -> Result<CartMutation, StorageError> {
        if quantity < 1 {
            return self.remove(scope, uid);
        }

        let mut items = self.items(scope);
        for item in &mut items {
            if &item.product.uid == uid {
                item.quantity = quantity;
            }
        }

        self.store.insert(scope, items.clone())?;
        Ok(CartMutation {
            items,
            message: None,
        })
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub fn clear(&self, scope: &str) -> Result<CartMutation, StorageError> {
        self.store.insert(scope, Vec::new())?;
        Ok(CartMutation {
            items: Vec::new(),
            message: Some("Cart cleared".to_owned()),
        })
    }

    /// Total item count of a cart.
    #[must_use]
    pub fn count(items: &[CartItem]) -> u32 {
        items.iter().map(|item| item.quantity).sum()
    }

    /// Cart total: sum of price x quantity, in decimal arithmetic.
    #[must_use]
    pub fn total(items: &[CartItem]) -> Price {
        let currency = items
            .first()
            .map_or(CurrencyCode::USD, |item| item.product.price.currency_code);
        let amount = items
            .iter()
            .map(|item| item.product.price.amount * Decimal::from(item.quantity))
            .sum();
        Price::new(amount, currency)
    }
}
