//! Catalog inspection.
//!
//! # Usage
//!
//! ```bash
//! cc-cli catalog list
//! ```

use coffeecorner_server::catalog::Catalog;

/// Print the seeded catalog.
pub fn list() {
    let catalog = Catalog::new();
    let stats = catalog.stats();

    tracing::info!(
        "{} products across {} categories",
        stats.products,
        stats.categories
    );

    for category in catalog.categories() {
        tracing::info!("{} ({})", category.name, category.slug);
        for product in catalog.products_in_category(category.slug.as_str()) {
            let featured = if product.featured { " [featured]" } else { "" };
            tracing::info!(
                "  {:<10} {:<22} {}{}",
                product.uid,
                product.title,
                product.price.display(),
                featured
            );
        }
    }
}
