//! Product assistant.
//!
//! A rule-based responder over the catalog: category listing, recommend by
//! category, keyword-scored recommendations, product descriptions (tracking
//! the last described product so "similar" works), and a bare-search rule.
//! When no local rule matches, callers fall back to the automations endpoint
//! ([`AutomationsClient`]) and finally to [`FALLBACK_TEXT`].
//!
//! Replies use lightweight markdown (`**bold**`) the way the rest of the API
//! carries display strings; rendering is the client's concern.

mod automations;

pub use automations::{AutomationsClient, AutomationsError};

use coffeecorner_core::ProductUid;

use crate::catalog::{Catalog, Product};

/// Static reply when nothing (local or remote) can answer.
pub const FALLBACK_TEXT: &str = "I didn't understand. Try: \"Tell me about Espresso\", \
     \"Recommend hot drinks\", or \"What categories are there?\"";

/// Words ignored when extracting recommendation keywords.
const STOP_WORDS: &[&str] = &[
    "recommend", "suggest", "drink", "drinks", "pastry", "pastries", "item", "items", "about",
    "on", "a", "an", "the", "with", "in", "for", "to",
];

/// How many items a listing reply shows.
const MAX_LISTED: usize = 5;

/// An assistant reply.
#[derive(Debug, Clone)]
pub struct AssistantReply {
    /// Reply text.
    pub text: String,
    /// Product described by this reply, to be remembered as "last viewed".
    pub last_viewed: Option<ProductUid>,
}

impl AssistantReply {
    fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            last_viewed: None,
        }
    }
}

/// Whether a message can be answered from local catalog data.
///
/// Mirrors the dispatch in [`respond`]: when this returns `false` the caller
/// should try the automations fallback.
#[must_use]
pub fn handles_locally(catalog: &Catalog, message: &str) -> bool {
    // Trim before lowercasing so byte offsets line up in extract_term
    let message = message.trim();
    let lower = message.to_lowercase();
    let lower = lower.as_str();
    if lower.is_empty() {
        return false;
    }

    if wants_category_listing(lower) {
        return true;
    }

    if lower.contains("recommend") || lower.contains("suggest") {
        for category in catalog.categories() {
            if lower.contains(&category.name.to_lowercase()) || lower.contains(category.slug.as_str())
            {
                return true;
            }
        }
        let keywords = extract_keywords(lower);
        if !keywords.is_empty() && !search_by_topic(catalog, &keywords).is_empty() {
            return true;
        }
        return lower.contains("similar");
    }

    if lower.contains("tell me about") || lower.contains("what is") || lower.contains("about ") {
        let term = extract_term(message, lower);
        return !catalog.search(term).is_empty();
    }

    !catalog.search(message).is_empty()
}

/// Produce a reply from local catalog data.
///
/// `last_viewed` is the product from the session's previous "tell me about"
/// reply, used for "similar" recommendations. Callers should only invoke this
/// when [`handles_locally`] returned `true`; otherwise the reply is
/// [`FALLBACK_TEXT`].
#[must_use]
pub fn respond(catalog: &Catalog, last_viewed: Option<&Product>, message: &str) -> AssistantReply {
    let message = message.trim();
    let lower = message.to_lowercase();
    let lower = lower.as_str();

    if wants_category_listing(lower) {
        return category_listing(catalog);
    }

    if lower.contains("recommend") || lower.contains("suggest") {
        return recommend(catalog, last_viewed, lower);
    }

    if lower.contains("tell me about") || lower.contains("what is") || lower.contains("about ") {
        return describe(catalog, extract_term(message, lower));
    }

    let results = catalog.search(message);
    if !results.is_empty() {
        let mut out = format!("**Search** ({} found)\n\n", results.len());
        push_listing(&mut out, &results);
        out.push_str("\nAsk for details on any item above.");
        return AssistantReply::text_only(out);
    }

    AssistantReply::text_only(FALLBACK_TEXT)
}

/// Category-listing intent: both word groups must be present.
fn wants_category_listing(lower: &str) -> bool {
    let opener = lower.contains("categor")
        || lower.contains("available")
        || lower.contains("what")
        || lower.contains("list");
    let subject = lower.contains("categor")
        || lower.contains("available")
        || lower.contains("there")
        || lower.contains("list");
    opener && subject
}

fn category_listing(catalog: &Catalog) -> AssistantReply {
    let categories = catalog.categories();
    if categories.is_empty() {
        return AssistantReply::text_only("Unable to load categories. Try again.");
    }

    let list = categories
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    AssistantReply::text_only(format!(
        "**Categories**\n\n{list}\n\nAsk for a recommendation in any category."
    ))
}

fn recommend(catalog: &Catalog, last_viewed: Option<&Product>, lower: &str) -> AssistantReply {
    if lower.contains("similar") {
        let Some(last) = last_viewed else {
            return AssistantReply::text_only(
                "Ask about a specific item first (e.g. \"Tell me about Espresso\"), \
                 then ask for similar recommendations.",
            );
        };

        let same_category: Vec<Product> = catalog
            .products_in_category(last.category.slug.as_str())
            .into_iter()
            .filter(|p| p.uid != last.uid)
            .collect();
        if same_category.is_empty() {
            return AssistantReply::text_only(format!(
                "No similar items found for {}.",
                last.title
            ));
        }

        let mut out = format!("**Similar to {}**\n\n", last.title);
        push_listing(&mut out, &same_category);
        out.push_str("\nAsk for details on any item above.");
        return AssistantReply::text_only(out);
    }

    for category in catalog.categories() {
        if lower.contains(&category.name.to_lowercase()) || lower.contains(category.slug.as_str()) {
            let products = catalog.products_in_category(category.slug.as_str());
            if products.is_empty() {
                return AssistantReply::text_only(format!(
                    "No {} available right now.",
                    category.name
                ));
            }

            let mut out = format!("**{}**\n\n", category.name);
            push_listing(&mut out, &products);
            out.push_str("\nAsk for details on any item above.");
            return AssistantReply::text_only(out);
        }
    }

    let keywords = extract_keywords(lower);
    if keywords.is_empty() {
        return AssistantReply::text_only(
            "Try: \"Recommend a hot drink\" or \"Suggest something chocolate\".",
        );
    }

    let results = search_by_topic(catalog, &keywords);
    let joined = keywords.join(", ");
    if results.is_empty() {
        return AssistantReply::text_only(format!(
            "No results for \"{joined}\". Try another term."
        ));
    }

    let mut out = format!("**Results for \"{joined}\"**\n\n");
    push_listing(&mut out, &results);
    out.push_str("\nAsk for details on any item above.");
    AssistantReply::text_only(out)
}

fn describe(catalog: &Catalog, term: &str) -> AssistantReply {
    let results = catalog.search(term);
    let Some(product) = results.first() else {
        return AssistantReply::text_only(format!(
            "No product found for \"{term}\". Check the name or try the menu."
        ));
    };

    let mut out = format!("**{}** - {}\n\n", product.title, product.price.display());
    if !product.description.is_empty() {
        out.push_str(&product.description);
        out.push_str("\n\n");
    }
    out.push_str(&format!("Category: {}\n\n", product.category.name));
    out.push_str("**Follow-up**\nAsk for \"similar\" or \"recommend a [category]\".");

    AssistantReply {
        text: out,
        last_viewed: Some(product.uid.clone()),
    }
}

/// Extract recommendation keywords: words longer than 2 chars, stop words
/// removed.
fn extract_keywords(message: &str) -> Vec<String> {
    message
        .to_lowercase()
        .split(' ')
        .filter(|word| word.len() > 2 && !STOP_WORDS.contains(word))
        .map(ToOwned::to_owned)
        .collect()
}

/// Score products against keywords: +10 per keyword in the title, +5 per
/// keyword in the description. Matches sort by descending score, catalog
/// order breaking ties.
fn search_by_topic(catalog: &Catalog, keywords: &[String]) -> Vec<Product> {
    let mut scored: Vec<(Product, u32)> = catalog
        .products()
        .iter()
        .map(|product| {
            let title = product.title.to_lowercase();
            let description = product.description.to_lowercase();
            let mut score = 0;
            for keyword in keywords {
                if title.contains(keyword) {
                    score += 10;
                }
                if description.contains(keyword) {
                    score += 5;
                }
            }
            (product.clone(), score)
        })
        .filter(|(_, score)| *score > 0)
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(product, _)| product).collect()
}

/// Extract the product term after "tell me about" / "what is" / "about".
fn extract_term<'a>(message: &'a str, lower: &str) -> &'a str {
    for pattern in ["tell me about", "what is", "about"] {
        if let Some(idx) = lower.find(pattern) {
            let rest = message.get(idx + pattern.len()..).unwrap_or("").trim();
            if rest.is_empty() {
                return message;
            }
            return rest;
        }
    }
    message
}

/// Append a numbered, price-tagged listing of up to [`MAX_LISTED`] products.
fn push_listing(out: &mut String, products: &[Product]) {
    for (i, product) in products.iter().take(MAX_LISTED).enumerate() {
        out.push_str(&format!(
            "{}. **{}** - {}\n",
            i + 1,
            product.title,
            product.price.display()
        ));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_keywords_filters_stop_words() {
        let keywords = extract_keywords("Recommend a chocolate drink for me");
        assert_eq!(keywords, vec!["chocolate".to_owned()]);
    }

    #[test]
    fn test_extract_term() {
        let message = "Tell me about the Cold Brew";
        let lower = message.to_lowercase();
        assert_eq!(extract_term(message, &lower), "the Cold Brew");

        let message = "what is espresso";
        let lower = message.to_lowercase();
        assert_eq!(extract_term(message, &lower), "espresso");
    }

    #[test]
    fn test_category_listing_intent() {
        assert!(wants_category_listing("what categories are there?"));
        assert!(wants_category_listing("list categories"));
        assert!(wants_category_listing("what's available?"));
        assert!(!wants_category_listing("what is espresso"));
        assert!(!wants_category_listing("recommend a latte"));
    }

    #[test]
    fn test_handles_locally_dispatch() {
        let catalog = Catalog::new();
        assert!(handles_locally(&catalog, "What categories are there?"));
        assert!(handles_locally(&catalog, "Recommend hot drinks"));
        assert!(handles_locally(&catalog, "Suggest something chocolate"));
        assert!(handles_locally(&catalog, "Tell me about Espresso"));
        assert!(handles_locally(&catalog, "cold brew"));

        assert!(!handles_locally(&catalog, ""));
        assert!(!handles_locally(&catalog, "how late are you open?"));
        assert!(!handles_locally(&catalog, "recommend a unicorn frappe"));
    }

    #[test]
    fn test_keyword_scoring_prefers_title_hits() {
        let catalog = Catalog::new();
        let results = search_by_topic(&catalog, &["chocolate".to_owned()]);
        assert!(!results.is_empty());
        // Chocolate Croissant has the keyword in its title (+10); mochas only
        // mention it in descriptions (+5)
        assert_eq!(results.first().unwrap().title, "Chocolate Croissant");
    }

    #[test]
    fn test_describe_sets_last_viewed() {
        let catalog = Catalog::new();
        let reply = respond(&catalog, None, "Tell me about Espresso");
        assert!(reply.text.contains("**Espresso** - $2.50"));
        assert!(reply.text.contains("Category: Hot Drinks"));
        let last = reply.last_viewed.unwrap();
        assert_eq!(last.as_str(), "prod_1");
    }

    #[test]
    fn test_similar_uses_last_viewed_category() {
        let catalog = Catalog::new();
        let espresso = catalog.product_by_slug("espresso").unwrap();
        let reply = respond(&catalog, Some(espresso), "recommend something similar");
        assert!(reply.text.starts_with("**Similar to Espresso**"));
        // Same category, excluding the product itself
        assert!(reply.text.contains("Latte"));
        assert!(!reply.text.contains("**Espresso** -"));
    }

    #[test]
    fn test_similar_without_last_viewed_hints() {
        let catalog = Catalog::new();
        let reply = respond(&catalog, None, "recommend something similar");
        assert!(reply.text.contains("Ask about a specific item first"));
    }

    #[test]
    fn test_recommend_by_category_lists_top_five() {
        let catalog = Catalog::new();
        let reply = respond(&catalog, None, "Recommend hot drinks");
        assert!(reply.text.starts_with("**Hot Drinks**"));
        // Five of five hot drinks listed
        assert!(reply.text.contains("5. "));
        assert!(!reply.text.contains("6. "));
    }

    #[test]
    fn test_unmatched_message_falls_back() {
        let catalog = Catalog::new();
        let reply = respond(&catalog, None, "sing me a song");
        assert_eq!(reply.text, FALLBACK_TEXT);
    }
}
