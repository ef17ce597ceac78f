//! Integration tests for the assistant's rule dispatch and replies.
//!
//! These run entirely against the in-memory catalog; the automations
//! fallback is exercised only as far as its absence (the static fallback
//! path is handled at the route layer).

use coffeecorner_server::assistant::{self, FALLBACK_TEXT};
use coffeecorner_server::catalog::Catalog;

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn test_local_rules_cover_the_documented_intents() {
    let catalog = Catalog::new();

    let locally_answerable = [
        "What categories are there?",
        "what's available?",
        "Recommend hot drinks",
        "recommend a pastry from Pastries",
        "Suggest something chocolate",
        "recommend something similar",
        "Tell me about Espresso",
        "what is cold brew",
        "croissant",
    ];
    for message in locally_answerable {
        assert!(
            assistant::handles_locally(&catalog, message),
            "expected local rule for {message:?}"
        );
    }

    let needs_fallback = [
        "",
        "   ",
        "how late are you open?",
        "do you deliver to Berlin?",
        "recommend a unicorn frappe",
    ];
    for message in needs_fallback {
        assert!(
            !assistant::handles_locally(&catalog, message),
            "expected fallback for {message:?}"
        );
    }
}

// =============================================================================
// Category listing
// =============================================================================

#[test]
fn test_category_listing_names_every_category() {
    let catalog = Catalog::new();
    let reply = assistant::respond(&catalog, None, "What categories are there?");

    assert!(reply.text.starts_with("**Categories**"));
    for category in catalog.categories() {
        assert!(reply.text.contains(&category.name));
    }
    assert!(reply.last_viewed.is_none());
}

// =============================================================================
// Recommendations
// =============================================================================

#[test]
fn test_recommend_by_category_caps_at_five() {
    let catalog = Catalog::new();
    let reply = assistant::respond(&catalog, None, "Recommend hot drinks");

    assert!(reply.text.starts_with("**Hot Drinks**"));
    assert!(reply.text.contains("1. "));
    assert!(reply.text.contains("5. "));
    assert!(!reply.text.contains("6. "));
}

#[test]
fn test_recommend_by_category_slug() {
    let catalog = Catalog::new();
    let reply = assistant::respond(&catalog, None, "suggest something cold");

    assert!(reply.text.starts_with("**Cold Drinks**"));
    assert!(reply.text.contains("Cold Brew"));
}

#[test]
fn test_keyword_recommendation_scores_titles_above_descriptions() {
    let catalog = Catalog::new();
    let reply = assistant::respond(&catalog, None, "Suggest something chocolate");

    // "suggest" is a stop word; "something" and "chocolate" survive
    assert!(reply.text.starts_with("**Results for \"something, chocolate\"**"));
    // Title hit (+10) outranks description-only hits (+5)
    assert!(reply.text.contains("1. **Chocolate Croissant**"));
    assert!(reply.text.contains("Mocha"));
}

#[test]
fn test_prices_render_with_two_decimals() {
    let catalog = Catalog::new();
    let reply = assistant::respond(&catalog, None, "Recommend pastries");

    assert!(reply.text.contains("$3.25"));
    assert!(reply.text.contains("$3.50"));
    assert!(reply.text.contains("$3.75"));
}

// =============================================================================
// Describe and "similar" flow
// =============================================================================

#[test]
fn test_describe_then_similar_flow() {
    let catalog = Catalog::new();

    // Describe records the product as last viewed
    let describe = assistant::respond(&catalog, None, "Tell me about Cold Brew");
    assert!(describe.text.starts_with("**Cold Brew** - $4.50"));
    assert!(describe.text.contains("Category: Cold Drinks"));
    let last_uid = describe.last_viewed.expect("describe sets last viewed");

    // "Similar" recommends from the same category, excluding the product
    let last = catalog.product_by_uid(&last_uid).expect("uid is in catalog");
    let similar = assistant::respond(&catalog, Some(last), "recommend something similar");
    assert!(similar.text.starts_with("**Similar to Cold Brew**"));
    assert!(similar.text.contains("Iced Latte"));
    assert!(!similar.text.contains("**Cold Brew** -"));
}

#[test]
fn test_similar_without_context_asks_for_an_item_first() {
    let catalog = Catalog::new();
    let reply = assistant::respond(&catalog, None, "suggest something similar");
    assert!(reply.text.contains("Ask about a specific item first"));
}

#[test]
fn test_describe_unknown_product() {
    let catalog = Catalog::new();
    let reply = assistant::respond(&catalog, None, "Tell me about the Flat White");

    assert!(reply.text.contains("No product found for"));
    assert!(reply.last_viewed.is_none());
}

// =============================================================================
// Bare search and fallback
// =============================================================================

#[test]
fn test_bare_product_query_lists_matches_with_count() {
    let catalog = Catalog::new();
    let reply = assistant::respond(&catalog, None, "latte");

    // Three matches: two title hits plus the muffin description's "latte";
    // title prefix match sorts first
    assert!(reply.text.starts_with("**Search** (3 found)"));
    assert!(reply.text.contains("1. **Latte**"));
    assert!(reply.text.contains("**Iced Latte**"));
    assert!(reply.text.contains("**Blueberry Muffin**"));
}

#[test]
fn test_unmatched_message_yields_fallback_text() {
    let catalog = Catalog::new();
    let reply = assistant::respond(&catalog, None, "open a support ticket");
    assert_eq!(reply.text, FALLBACK_TEXT);
}
