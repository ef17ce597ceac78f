//! Catalog seed data.

use coffeecorner_core::{AvatarId, CategoryUid, CurrencyCode, Price, ProductUid, Slug};

use super::{Avatar, Category, Product};

const IMG_ESPRESSO: &str =
    "https://images.unsplash.com/photo-1514432324607-a09d9b4aefdd?w=400&h=400&fit=crop";
const IMG_LATTE: &str =
    "https://images.unsplash.com/photo-1561882468-9110e03e0f78?w=400&h=400&fit=crop";
const IMG_CAPPUCCINO: &str =
    "https://images.unsplash.com/photo-1572442388796-11668a67e53d?w=400&h=400&fit=crop";
const IMG_AMERICANO: &str =
    "https://images.unsplash.com/photo-1517701550927-30cf4ba1dba5?w=400&h=400&fit=crop";
const IMG_MOCHA: &str =
    "https://images.unsplash.com/photo-1544787219-7f47ccb76574?w=400&h=400&fit=crop";
const IMG_COLD_BREW: &str =
    "https://images.unsplash.com/photo-1517487881594-2787fef5ebf7?w=400&h=400&fit=crop";
const IMG_ICED: &str =
    "https://images.unsplash.com/photo-1461023058943-07fcbe16d735?w=400&h=400&fit=crop";
const IMG_PASTRY: &str =
    "https://images.unsplash.com/photo-1558961363-fa8fdf82db35?w=400&h=400&fit=crop";
const IMG_CROISSANT: &str =
    "https://images.unsplash.com/photo-1555507036-ab1f4038808a?w=400&h=400&fit=crop";
const IMG_MUFFIN: &str =
    "https://images.unsplash.com/photo-1607958996333-41aef7caefaa?w=400&h=400&fit=crop";

fn category(uid: &str, slug: &str, name: &str) -> Category {
    Category {
        uid: CategoryUid::new(uid),
        slug: Slug::parse(slug).expect("seed category slug is valid"),
        name: name.to_owned(),
    }
}

fn hot() -> Category {
    category("cat_hot", "hot", "Hot Drinks")
}

fn cold() -> Category {
    category("cat_cold", "cold", "Cold Drinks")
}

fn pastries() -> Category {
    category("cat_pastries", "pastries", "Pastries")
}

#[allow(clippy::too_many_arguments)]
fn product(
    uid: &str,
    title: &str,
    slug: &str,
    description: &str,
    price_cents: i64,
    category: Category,
    image: &str,
    featured: bool,
) -> Product {
    Product {
        uid: ProductUid::new(uid),
        title: title.to_owned(),
        slug: Slug::parse(slug).expect("seed product slug is valid"),
        description: description.to_owned(),
        price: Price::from_cents(price_cents, CurrencyCode::USD),
        category,
        image: image.to_owned(),
        featured,
    }
}

/// The three menu categories.
pub fn categories() -> Vec<Category> {
    vec![hot(), cold(), pastries()]
}

/// The full 11-item menu.
pub fn products() -> Vec<Product> {
    vec![
        product(
            "prod_1",
            "Espresso",
            "espresso",
            "A rich, bold double shot of our house blend, pulled to order for a smooth \
             crema and full-bodied flavor. The perfect pick-me-up any time of day; enjoy \
             as-is or as the base for your favorite milk drink.",
            250,
            hot(),
            IMG_ESPRESSO,
            true,
        ),
        product(
            "prod_2",
            "Latte",
            "latte",
            "Smooth espresso with steamed milk and a thin layer of silky foam. Creamy and \
             mild, with the coffee shining through; customize with vanilla, caramel, \
             hazelnut, or any syrup. A crowd-pleaser that's perfect morning or afternoon.",
            425,
            hot(),
            IMG_LATTE,
            true,
        ),
        product(
            "prod_3",
            "Cappuccino",
            "cappuccino",
            "Equal parts espresso, steamed milk, and a thick cap of velvety foam. Bold \
             enough to taste the coffee, smooth enough to sip slowly. A classic favorite \
             for those who love balance and a little indulgence.",
            400,
            hot(),
            IMG_CAPPUCCINO,
            true,
        ),
        product(
            "prod_4",
            "Americano",
            "americano",
            "Two shots of espresso topped with hot water for a smooth, full-bodied cup. \
             Simple, strong, and perfect for those who love the pure taste of coffee \
             without the intensity of a straight shot.",
            300,
            hot(),
            IMG_AMERICANO,
            false,
        ),
        product(
            "prod_5",
            "Mocha",
            "mocha",
            "Espresso with steamed milk and rich dark chocolate, topped with a swirl of \
             whipped cream. Sweet, indulgent, and deeply satisfying; ideal when you want \
             something dessert-like in a cup. Perfect with an extra shot for a stronger \
             kick.",
            475,
            hot(),
            IMG_MOCHA,
            true,
        ),
        product(
            "prod_6",
            "Cold Brew",
            "cold-brew",
            "Our signature cold brew is slow-steeped for 18 hours in cold water for a \
             smooth, low-acid finish. Served over ice, it's refreshing and naturally \
             sweet with no bitterness; great black or with a splash of milk. A summer \
             staple you can enjoy year-round.",
            450,
            cold(),
            IMG_COLD_BREW,
            true,
        ),
        product(
            "prod_7",
            "Iced Latte",
            "iced-latte",
            "Espresso and cold milk over ice for a refreshing, creamy drink. Smooth and \
             satisfying any time of day; customize with your favorite syrup for a sweet \
             twist.",
            450,
            cold(),
            IMG_ICED,
            false,
        ),
        product(
            "prod_8",
            "Iced Mocha",
            "iced-mocha",
            "Cold brew base blended with rich dark chocolate and a touch of cream, served \
             over ice. Decadent, refreshing, and perfect for chocolate lovers.",
            500,
            cold(),
            IMG_MOCHA,
            false,
        ),
        product(
            "prod_9",
            "Butter Croissant",
            "butter-croissant",
            "Fresh-baked, golden croissant with layers of buttery, flaky pastry. Light and \
             crisp on the outside, soft inside; perfect with any coffee or tea.",
            325,
            pastries(),
            IMG_CROISSANT,
            false,
        ),
        product(
            "prod_10",
            "Blueberry Muffin",
            "blueberry-muffin",
            "Moist, tender muffin packed with juicy blueberries and a hint of vanilla. \
             Baked fresh daily; ideal for breakfast or an afternoon treat with your \
             latte.",
            350,
            pastries(),
            IMG_MUFFIN,
            true,
        ),
        product(
            "prod_11",
            "Chocolate Croissant",
            "chocolate-croissant",
            "Buttery, flaky croissant filled with ribbons of dark chocolate. A classic \
             French-style sweet that pairs beautifully with an espresso or cappuccino.",
            375,
            pastries(),
            IMG_PASTRY,
            false,
        ),
    ]
}

/// The fixed profile avatar set; the first entry is the default.
pub fn avatars() -> Vec<Avatar> {
    let avatar = |id: &str, name: &str, emoji: &str| Avatar {
        id: AvatarId::new(id),
        name: name.to_owned(),
        emoji: emoji.to_owned(),
    };

    vec![
        avatar("avatar_1", "Avatar 1", "\u{2615}"),
        avatar("avatar_2", "Avatar 2", "\u{1f950}"),
        avatar("avatar_3", "Avatar 3", "\u{1f369}"),
        avatar("avatar_4", "Avatar 4", "\u{1f9c1}"),
        avatar("avatar_5", "Avatar 5", "\u{1f36a}"),
        avatar("avatar_6", "Avatar 6", "\u{1f964}"),
        avatar("avatar_7", "Avatar 7", "\u{1fad6}"),
    ]
}
