//! Static in-memory product catalog.
//!
//! The catalog is seeded at process start and read-only afterwards: 11
//! products across 3 categories, plus the fixed profile avatar set. Search is
//! a linear case-insensitive substring scan with prefix matches promoted
//! first.

mod data;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use coffeecorner_core::{AvatarId, CategoryUid, Price, ProductUid, Slug};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub uid: CategoryUid,
    pub slug: Slug,
    pub name: String,
}

/// A catalog product.
///
/// Cart lines carry a full `Product` snapshot, so this type is also part of
/// the cart's persisted format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub uid: ProductUid,
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub price: Price,
    pub category: Category,
    pub image: String,
    pub featured: bool,
}

/// A profile avatar (emoji-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    pub id: AvatarId,
    pub name: String,
    pub emoji: String,
}

/// Catalog counts, reported by the readiness endpoint and the CLI.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CatalogStats {
    pub products: usize,
    pub categories: usize,
}

/// The product catalog.
///
/// Cheaply cloneable via `Arc`; handlers share one instance through
/// application state.
#[derive(Debug, Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

#[derive(Debug)]
struct CatalogInner {
    products: Vec<Product>,
    categories: Vec<Category>,
    avatars: Vec<Avatar>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Build the catalog from the seed data.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CatalogInner {
                products: data::products(),
                categories: data::categories(),
                avatars: data::avatars(),
            }),
        }
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.inner.products
    }

    /// Products flagged as featured.
    #[must_use]
    pub fn featured_products(&self) -> Vec<Product> {
        self.inner
            .products
            .iter()
            .filter(|p| p.featured)
            .cloned()
            .collect()
    }

    /// Look up a product by slug.
    #[must_use]
    pub fn product_by_slug(&self, slug: &str) -> Option<&Product> {
        self.inner.products.iter().find(|p| p.slug.as_str() == slug)
    }

    /// Look up a product by uid.
    #[must_use]
    pub fn product_by_uid(&self, uid: &ProductUid) -> Option<&Product> {
        self.inner.products.iter().find(|p| &p.uid == uid)
    }

    /// Products in a category, by category slug.
    #[must_use]
    pub fn products_in_category(&self, category_slug: &str) -> Vec<Product> {
        self.inner
            .products
            .iter()
            .filter(|p| p.category.slug.as_str() == category_slug)
            .cloned()
            .collect()
    }

    /// All categories.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.inner.categories
    }

    /// Look up a category by slug.
    #[must_use]
    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.inner
            .categories
            .iter()
            .find(|c| c.slug.as_str() == slug)
    }

    /// All profile avatars.
    #[must_use]
    pub fn avatars(&self) -> &[Avatar] {
        &self.inner.avatars
    }

    /// Look up an avatar by id, falling back to the default avatar.
    #[must_use]
    pub fn avatar_or_default(&self, id: &AvatarId) -> &Avatar {
        self.inner
            .avatars
            .iter()
            .find(|a| &a.id == id)
            .or_else(|| self.inner.avatars.first())
            .expect("avatar seed data is non-empty")
    }

    /// Search products by title, description, or category name.
    ///
    /// Case-insensitive substring match; results whose title starts with the
    /// query sort first, the rest keep catalog order. A blank query returns
    /// no results.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<Product> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<Product> = self
            .inner
            .products
            .iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&term)
                    || p.description.to_lowercase().contains(&term)
                    || p.category.name.to_lowercase().contains(&term)
            })
            .cloned()
            .collect();

        // Stable sort: prefix matches first, catalog order otherwise
        results.sort_by_key(|p| !p.title.to_lowercase().starts_with(&term));
        results
    }

    /// Catalog counts.
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            products: self.inner.products.len(),
            categories: self.inner.categories.len(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_counts() {
        let catalog = Catalog::new();
        let stats = catalog.stats();
        assert_eq!(stats.products, 11);
        assert_eq!(stats.categories, 3);
        assert_eq!(catalog.avatars().len(), 7);
    }

    #[test]
    fn test_product_slugs_are_unique() {
        let catalog = Catalog::new();
        let mut slugs: Vec<&str> = catalog.products().iter().map(|p| p.slug.as_str()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), catalog.products().len());
    }

    #[test]
    fn test_lookup_by_slug_and_uid() {
        let catalog = Catalog::new();
        let espresso = catalog.product_by_slug("espresso").unwrap();
        assert_eq!(espresso.title, "Espresso");
        assert_eq!(
            catalog.product_by_uid(&espresso.uid).unwrap().slug,
            espresso.slug
        );
        assert!(catalog.product_by_slug("flat-white").is_none());
    }

    #[test]
    fn test_products_in_category() {
        let catalog = Catalog::new();
        let pastries = catalog.products_in_category("pastries");
        assert_eq!(pastries.len(), 3);
        assert!(pastries.iter().all(|p| p.category.slug.as_str() == "pastries"));
        assert!(catalog.products_in_category("tea").is_empty());
    }

    #[test]
    fn test_featured_subset() {
        let catalog = Catalog::new();
        let featured = catalog.featured_products();
        assert!(!featured.is_empty());
        assert!(featured.len() < catalog.products().len());
        assert!(featured.iter().all(|p| p.featured));
    }

    #[test]
    fn test_search_case_insensitive_substring() {
        let catalog = Catalog::new();
        let results = catalog.search("LATTE");
        assert!(results.iter().any(|p| p.title == "Latte"));
        assert!(results.iter().any(|p| p.title == "Iced Latte"));
    }

    #[test]
    fn test_search_matches_description_and_category() {
        let catalog = Catalog::new();
        // "blueberries" appears only in the muffin description
        let by_description = catalog.search("blueberries");
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description.first().unwrap().title, "Blueberry Muffin");

        // Category name match returns everything in the category
        let by_category = catalog.search("pastries");
        assert!(by_category.len() >= 3);
    }

    #[test]
    fn test_search_promotes_prefix_matches() {
        let catalog = Catalog::new();
        // "mocha" matches Mocha (prefix) and Iced Mocha (substring)
        let results = catalog.search("mocha");
        assert_eq!(results.first().unwrap().title, "Mocha");
    }

    #[test]
    fn test_search_blank_query() {
        let catalog = Catalog::new();
        assert!(catalog.search("").is_empty());
        assert!(catalog.search("   ").is_empty());
    }

    #[test]
    fn test_avatar_fallback() {
        let catalog = Catalog::new();
        let known = catalog.avatar_or_default(&coffeecorner_core::AvatarId::new("avatar_3"));
        assert_eq!(known.id.as_str(), "avatar_3");

        let unknown = catalog.avatar_or_default(&coffeecorner_core::AvatarId::new("avatar_99"));
        assert_eq!(unknown.id.as_str(), "avatar_1");
    }
}
