//! Integration tests for the cart manager.
//!
//! Exercises the full path: catalog products into `CartService` over a real
//! file-backed store.

use rust_decimal::Decimal;

use coffeecorner_core::ProductUid;
use coffeecorner_integration_tests::temp_data_dir;
use coffeecorner_server::catalog::Catalog;
use coffeecorner_server::services::cart::CartService;
use coffeecorner_server::storage::JsonStore;

const SCOPE: &str = "coffeecorner_cart_test-user";

fn service(label: &str) -> CartService {
    let store = JsonStore::open(temp_data_dir(label).join("carts.json"))
        .expect("cart store opens");
    CartService::new(store)
}

#[test]
fn test_add_increments_existing_lines() {
    let catalog = Catalog::new();
    let carts = service("add");
    let espresso = catalog.product_by_slug("espresso").expect("seeded").clone();

    let first = carts.add(SCOPE, espresso.clone(), 1).expect("add persists");
    assert_eq!(first.items.len(), 1);
    assert_eq!(first.message.as_deref(), Some("\"Espresso\" added to cart"));

    let second = carts.add(SCOPE, espresso, 2).expect("add persists");
    assert_eq!(second.items.len(), 1, "same product stays one line");
    assert_eq!(second.items[0].quantity, 3);
}

#[test]
fn test_new_lines_clamp_quantity_to_one() {
    let catalog = Catalog::new();
    let carts = service("clamp");
    let latte = catalog.product_by_slug("latte").expect("seeded").clone();

    let mutation = carts.add(SCOPE, latte, 0).expect("add persists");
    assert_eq!(mutation.items[0].quantity, 1);
}

#[test]
fn test_total_is_sum_of_price_times_quantity() {
    let catalog = Catalog::new();
    let carts = service("total");
    let espresso = catalog.product_by_slug("espresso").expect("seeded").clone();
    let muffin = catalog
        .product_by_slug("blueberry-muffin")
        .expect("seeded")
        .clone();

    carts.add(SCOPE, espresso, 2).expect("add persists"); // 2 x 2.50
    carts.add(SCOPE, muffin, 3).expect("add persists"); // 3 x 3.50

    let items = carts.items(SCOPE);
    assert_eq!(CartService::count(&items), 5);

    let total = CartService::total(&items);
    assert_eq!(total.amount, Decimal::new(1550, 2)); // 5.00 + 10.50
    assert_eq!(total.display(), "$15.50");
}

#[test]
fn test_set_quantity_below_one_removes_the_line() {
    let catalog = Catalog::new();
    let carts = service("setqty");
    let mocha = catalog.product_by_slug("mocha").expect("seeded").clone();
    let uid = mocha.uid.clone();

    carts.add(SCOPE, mocha, 2).expect("add persists");

    let updated = carts.set_quantity(SCOPE, &uid, 5).expect("update persists");
    assert_eq!(updated.items[0].quantity, 5);

    let removed = carts.set_quantity(SCOPE, &uid, 0).expect("update persists");
    assert!(removed.items.is_empty());
    assert_eq!(
        removed.message.as_deref(),
        Some("\"Mocha\" removed from cart")
    );
}

#[test]
fn test_remove_drops_only_the_named_line() {
    let catalog = Catalog::new();
    let carts = service("remove");
    let espresso = catalog.product_by_slug("espresso").expect("seeded").clone();
    let latte = catalog.product_by_slug("latte").expect("seeded").clone();
    let espresso_uid = espresso.uid.clone();

    carts.add(SCOPE, espresso, 1).expect("add persists");
    carts.add(SCOPE, latte, 1).expect("add persists");

    let mutation = carts.remove(SCOPE, &espresso_uid).expect("remove persists");
    assert_eq!(mutation.items.len(), 1);
    assert_eq!(mutation.items[0].product.title, "Latte");

    // Removing a line that isn't there is a quiet no-op
    let again = carts.remove(SCOPE, &espresso_uid).expect("remove persists");
    assert_eq!(again.items.len(), 1);
    assert!(again.message.is_none());
}

#[test]
fn test_clear_empties_the_cart() {
    let catalog = Catalog::new();
    let carts = service("clear");
    let espresso = catalog.product_by_slug("espresso").expect("seeded").clone();

    carts.add(SCOPE, espresso, 4).expect("add persists");
    let mutation = carts.clear(SCOPE).expect("clear persists");

    assert!(mutation.items.is_empty());
    assert_eq!(mutation.message.as_deref(), Some("Cart cleared"));
    assert_eq!(CartService::count(&carts.items(SCOPE)), 0);
}

#[test]
fn test_carts_are_scoped_and_persist_across_reopen() {
    let catalog = Catalog::new();
    let dir = temp_data_dir("scoped");
    let espresso = catalog.product_by_slug("espresso").expect("seeded").clone();

    {
        let store = JsonStore::open(dir.join("carts.json")).expect("cart store opens");
        let carts = CartService::new(store);
        carts
            .add("coffeecorner_cart_user-a", espresso.clone(), 1)
            .expect("add persists");
        carts
            .add("coffeecorner_cart_user-b", espresso, 5)
            .expect("add persists");
    }

    // Reopen the same file: both scopes survive independently
    let store = JsonStore::open(dir.join("carts.json")).expect("cart store reopens");
    let carts = CartService::new(store);

    let a = carts.items("coffeecorner_cart_user-a");
    let b = carts.items("coffeecorner_cart_user-b");
    assert_eq!(CartService::count(&a), 1);
    assert_eq!(CartService::count(&b), 5);
    assert!(carts.items("coffeecorner_cart_user-c").is_empty());
}

#[test]
fn test_cart_item_snapshot_roundtrips_through_json() {
    let catalog = Catalog::new();
    let carts = service("json");
    let croissant = catalog
        .product_by_slug("butter-croissant")
        .expect("seeded")
        .clone();

    carts.add(SCOPE, croissant, 2).expect("add persists");

    let items = carts.items(SCOPE);
    let raw = serde_json::to_string(&items).expect("cart serializes");
    assert!(raw.contains("butter-croissant"));
    assert!(raw.contains("\"quantity\":2"));

    let uid = ProductUid::new("prod_9");
    assert_eq!(items[0].product.uid, uid);
}
