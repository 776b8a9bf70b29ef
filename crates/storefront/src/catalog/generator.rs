//! Synthetic catalog generation.
//!
//! Products are built from a fixed list of garment templates crossed with a
//! color and a style vocabulary. Product `i` (numbered from 1) takes template
//! `i mod 27` and description variant `i mod 5`; color, style, price offset,
//! discount and stock are random.

use chrono::{DateTime, SubsecRound, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use fashion_cube_core::{Department, DepartmentId, Price, Product, ProductId, department_for_category};

/// Catalog size the client generates for its offline fallback.
pub const DEFAULT_CLIENT_SIZE: usize = 1000;

/// Catalog size the seed command writes by default.
pub const DEFAULT_SEED_SIZE: usize = 100;

/// Size list every generated product carries.
const SIZES: &str = "S,M,L,XL";

/// Price offset range around the template base price, in cents.
const PRICE_OFFSET_CENTS: core::ops::Range<i64> = -2500..2500;

/// Discount ratio range, in basis points of the price.
const DISCOUNT_BPS: core::ops::Range<u32> = 7000..9000;

/// Generated prices never drop below this, in cents.
const MIN_PRICE_CENTS: i64 = 99;

struct Template {
    emoji: &'static str,
    title: &'static str,
    category: &'static str,
    base_cents: i64,
    descriptions: [&'static str; 5],
}

const fn template(
    emoji: &'static str,
    title: &'static str,
    category: &'static str,
    base_cents: i64,
    descriptions: [&'static str; 5],
) -> Template {
    Template {
        emoji,
        title,
        category,
        base_cents,
        descriptions,
    }
}

#[rustfmt::skip]
const TEMPLATES: [Template; 27] = [
    // men
    template("👕", "T-Shirt", "men", 2999, ["Classic cotton", "Vintage style", "Modern fit", "Comfortable daily wear", "Premium quality"]),
    template("👖", "Jeans", "men", 7999, ["Slim fit", "Regular cut", "Distressed style", "Classic blue", "Comfortable stretch"]),
    template("🧥", "Jacket", "men", 14999, ["Leather style", "Denim classic", "Bomber jacket", "Windbreaker", "Warm winter"]),
    template("👔", "Tie", "men", 3999, ["Silk elegance", "Striped pattern", "Solid color", "Designer style", "Business formal"]),
    template("🩳", "Shorts", "men", 4499, ["Athletic style", "Cargo pockets", "Beach vibes", "Casual comfort", "Summer essential"]),
    template("🧢", "Cap", "men", 2499, ["Baseball style", "Trucker hat", "Snapback cool", "Dad hat vibes", "Street style"]),
    // women
    template("👗", "Dress", "women", 8999, ["Elegant evening", "Summer floral", "Cocktail party", "Casual day", "Maxi style"]),
    template("👚", "Blouse", "women", 5499, ["Silk elegance", "Casual cotton", "Office chic", "Romantic lace", "Flowy style"]),
    template("👙", "Bikini", "women", 6499, ["Beach ready", "Tropical vibes", "Classic style", "Sporty fit", "Designer pattern"]),
    template("🩱", "Swimsuit", "women", 6999, ["One-piece elegance", "Athletic style", "Retro vibes", "Modern cut", "High fashion"]),
    template("🧣", "Scarf", "women", 3499, ["Silk luxury", "Wool warmth", "Patterned beauty", "Solid elegance", "Vintage style"]),
    template("👠", "Heels", "women", 9999, ["Classic pumps", "Stiletto style", "Wedge comfort", "Platform height", "Designer look"]),
    // shoes
    template("👟", "Sneakers", "shoes", 11999, ["Running style", "Basketball cool", "Street fashion", "Athletic comfort", "Designer brand"]),
    template("👞", "Dress Shoes", "shoes", 13999, ["Oxford style", "Loafer comfort", "Derby classic", "Business formal", "Italian leather"]),
    template("🥾", "Boots", "shoes", 15999, ["Combat style", "Chelsea chic", "Hiking ready", "Winter warmth", "Western vibes"]),
    template("🩴", "Sandals", "shoes", 4999, ["Beach flip-flops", "Casual slides", "Strappy summer", "Comfort fit", "Sporty style"]),
    template("👡", "Formal Shoes", "shoes", 12999, ["Evening elegance", "Party ready", "Wedding style", "Designer brand", "Luxury comfort"]),
    // accessories
    template("👜", "Handbag", "accessories", 14999, ["Leather luxury", "Crossbody style", "Tote spacious", "Designer brand", "Evening clutch"]),
    template("🎒", "Backpack", "accessories", 8999, ["School ready", "Laptop safe", "Travel sized", "Sporty style", "Designer look"]),
    template("👛", "Wallet", "accessories", 5999, ["Leather classic", "Minimalist style", "Bifold design", "Card holder", "Luxury brand"]),
    template("🕶️", "Sunglasses", "accessories", 7999, ["Aviator style", "Wayfarer classic", "Cat-eye chic", "Sport wrap", "Designer frames"]),
    template("⌚", "Watch", "accessories", 19999, ["Digital smart", "Analog classic", "Sport chronograph", "Luxury timepiece", "Fashion statement"]),
    template("💍", "Ring", "accessories", 29999, ["Diamond sparkle", "Gold band", "Silver style", "Statement piece", "Minimalist design"]),
    template("📿", "Necklace", "accessories", 12999, ["Pearl elegance", "Chain style", "Pendant beauty", "Statement piece", "Delicate charm"]),
    template("👓", "Glasses", "accessories", 14999, ["Reading style", "Prescription fit", "Blue light blocking", "Fashion frames", "Designer look"]),
    template("🧤", "Gloves", "accessories", 4499, ["Leather luxury", "Wool warmth", "Touchscreen compatible", "Winter essential", "Elegant style"]),
    template("🎩", "Hat", "accessories", 6999, ["Fedora style", "Beanie warmth", "Sun protection", "Fashion statement", "Classic design"]),
];

const COLORS: [&str; 12] = [
    "Red", "Blue", "Green", "Black", "White", "Pink", "Yellow", "Purple", "Orange", "Brown",
    "Gray", "Navy",
];

const STYLES: [&str; 10] = [
    "Classic", "Modern", "Vintage", "Trendy", "Elegant", "Casual", "Sporty", "Luxury", "Minimal",
    "Bold",
];

/// Generate `count` products with the thread-local RNG.
#[must_use]
pub fn generate(count: usize) -> Vec<Product> {
    generate_with(count, &mut rand::rng(), now())
}

/// Generate `count` products from a fixed seed.
///
/// The same seed yields the same titles, prices and stock levels.
#[must_use]
pub fn generate_seeded(count: usize, seed: u64) -> Vec<Product> {
    generate_with(count, &mut StdRng::seed_from_u64(seed), now())
}

/// Generate with an optional seed, falling back to the thread-local RNG.
#[must_use]
pub fn generate_maybe_seeded(count: usize, seed: Option<u64>) -> Vec<Product> {
    match seed {
        Some(seed) => generate_seeded(count, seed),
        None => generate(count),
    }
}

/// Generate `count` products, numbered `1..=count`, all stamped with `date`.
pub fn generate_with<R: Rng + ?Sized>(
    count: usize,
    rng: &mut R,
    date: DateTime<Utc>,
) -> Vec<Product> {
    (1..=count).map(|i| product(i, rng, date)).collect()
}

#[allow(clippy::indexing_slicing)] // Every index is reduced modulo its array length
fn product<R: Rng + ?Sized>(i: usize, rng: &mut R, date: DateTime<Utc>) -> Product {
    let template = &TEMPLATES[i % TEMPLATES.len()];
    let color = COLORS[rng.random_range(0..COLORS.len())];
    let style = STYLES[rng.random_range(0..STYLES.len())];
    let description = template.descriptions[i % template.descriptions.len()];

    let price_cents =
        (template.base_cents + rng.random_range(PRICE_OFFSET_CENTS)).max(MIN_PRICE_CENTS);
    let price = Price::from_cents(price_cents);
    let discounted_price = price.scale_bps(rng.random_range(DISCOUNT_BPS));

    Product {
        id: ProductId::from(u64::try_from(i).unwrap_or(u64::MAX)),
        title: format!("{style} {color} {}", template.title),
        price,
        discounted_price: Some(discounted_price),
        emoji: template.emoji.to_owned(),
        image_path: template.emoji.to_owned(),
        image_2: template.emoji.to_owned(),
        thumbnail: template.emoji.to_owned(),
        description: format!(
            "{description} {} in {}",
            template.title.to_lowercase(),
            color.to_lowercase()
        ),
        category: template.category.to_owned(),
        department: Some(department_for_category(template.category).to_owned()),
        quantity: rng.random_range(10..60),
        size: SIZES.to_owned(),
        color: color.to_owned(),
        date: Some(date),
    }
}

/// Millisecond precision, matching the wire format.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// The fixed storefront departments.
#[must_use]
pub fn departments() -> Vec<Department> {
    [
        ("Men", "Men's clothing and accessories", "T-Shirts,Jeans,Jackets,Shirts,Casual Wear"),
        ("Women", "Women's clothing and accessories", "Dresses,Tops,Skirts,Sweaters,Casual Wear"),
        ("Shoes", "Footwear for all occasions", "Sneakers,Boots,Sandals,Formal Shoes,Athletic"),
        ("Accessories", "Fashion accessories and more", "Handbags,Wallets,Jewelry,Belts,Sunglasses"),
    ]
    .into_iter()
    .zip(1_u64..)
    .map(|((name, description, categories), id)| Department {
        id: DepartmentId::from(id),
        name: name.to_owned(),
        description: description.to_owned(),
        categories: categories.to_owned(),
    })
    .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fixed_date() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    #[test]
    fn test_ids_are_sequential() {
        let products = generate(30);
        assert_eq!(products.len(), 30);
        assert_eq!(products[0].id.as_str(), "1");
        assert_eq!(products[29].id.as_str(), "30");
    }

    #[test]
    fn test_template_and_description_follow_index() {
        let products = generate_seeded(60, 1);
        // Index 1 → Jeans, description variant 1.
        assert!(products[0].title.ends_with(" Jeans"));
        assert!(products[0].description.starts_with("Regular cut jeans in "));
        // Index 27 wraps to the first template (T-Shirt), variant 2.
        assert!(products[26].title.ends_with(" T-Shirt"));
        assert!(products[26].description.starts_with("Modern fit t-shirt in "));
    }

    #[test]
    fn test_discount_never_exceeds_price() {
        for product in generate(DEFAULT_CLIENT_SIZE) {
            let discounted = product.discounted_price.unwrap();
            assert!(
                discounted <= product.price,
                "{}: {discounted} > {}",
                product.id,
                product.price
            );
            assert!(product.price >= Price::from_cents(MIN_PRICE_CENTS));
        }
    }

    #[test]
    fn test_fields_within_ranges() {
        for product in generate_seeded(DEFAULT_SEED_SIZE, 42) {
            let template = TEMPLATES
                .iter()
                .find(|t| product.title.ends_with(t.title))
                .unwrap();
            let floor = (template.base_cents - 2500).max(MIN_PRICE_CENTS);
            assert!(product.price >= Price::from_cents(floor));
            assert!(product.price < Price::from_cents(template.base_cents + 2500));
            assert!((10..60).contains(&product.quantity));
            assert_eq!(product.size, "S,M,L,XL");
            assert!(COLORS.contains(&product.color.as_str()));
            assert!(STYLES.iter().any(|style| product.title.starts_with(style)));
            assert_eq!(product.emoji, template.emoji);
            assert_eq!(product.image_path, template.emoji);
            assert_eq!(product.department_name(), department_for_category(&product.category));
        }
    }

    #[test]
    fn test_seed_is_deterministic() {
        let a = generate_with(50, &mut StdRng::seed_from_u64(9), fixed_date());
        let b = generate_with(50, &mut StdRng::seed_from_u64(9), fixed_date());
        assert_eq!(a, b);
    }

    #[test]
    fn test_departments() {
        let departments = departments();
        let names: Vec<_> = departments.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Men", "Women", "Shoes", "Accessories"]);
        assert_eq!(departments[2].id.as_str(), "3");
    }
}
