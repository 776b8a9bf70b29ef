//! Shopping cart with derived aggregates.
//!
//! A [`Cart`] maps product IDs to line items and carries two aggregates,
//! `totalQty` and `totalPrice`. The aggregates are never updated
//! incrementally: every mutation recomputes them from the line items, and
//! deserialization does the same, so a cart read from the wire or from the
//! local store always satisfies
//!
//! - `total_qty == Σ line.qty`
//! - `total_price == Σ line.price × line.qty`
//!
//! A line whose quantity drops to zero or below is removed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::{ProductId, UserId};
use super::price::Price;
use super::product::Product;

/// One product in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product snapshot taken when the line was created.
    pub item: Product,
    pub qty: u32,
    /// Unit price charged for this line.
    pub price: Price,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price.times(self.qty)
    }
}

/// Direction of a single-step quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityChange {
    Increase,
    Decrease,
}

impl QuantityChange {
    /// The signed delta this change applies.
    #[must_use]
    pub const fn delta(self) -> i64 {
        match self {
            Self::Increase => 1,
            Self::Decrease => -1,
        }
    }
}

/// A cart line asking for more units than are in stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutOfStock {
    pub product_id: ProductId,
    pub requested: u32,
    /// Units in stock; 0 when the product no longer exists.
    pub available: u32,
}

/// Result of checking a cart against current stock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryCheck {
    pub valid: bool,
    pub out_of_stock: Vec<OutOfStock>,
}

/// A user's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CartRecord")]
pub struct Cart {
    items: BTreeMap<ProductId, CartLine>,
    total_qty: u32,
    total_price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<UserId>,
}

/// Wire/storage shape of a cart; aggregates are ignored on the way in.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartRecord {
    #[serde(default)]
    items: BTreeMap<ProductId, CartLine>,
    #[serde(default)]
    user_id: Option<UserId>,
}

impl From<CartRecord> for Cart {
    fn from(record: CartRecord) -> Self {
        let mut cart = Self {
            items: record.items,
            total_qty: 0,
            total_price: Price::ZERO,
            user_id: record.user_id,
        };
        cart.items.retain(|_, line| line.qty > 0);
        cart.recompute();
        cart
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
            total_qty: 0,
            total_price: Price::ZERO,
            user_id: None,
        }
    }
}

impl Cart {
    /// A freshly initialized empty cart for a user.
    #[must_use]
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    /// Add one unit of `product`.
    ///
    /// Inserts a new line at quantity 1 charged at the product's unit price,
    /// or increments the existing line (keeping its original snapshot and
    /// price).
    pub fn add_item(&mut self, product: &Product) {
        self.items
            .entry(product.id.clone())
            .and_modify(|line| line.qty = line.qty.saturating_add(1))
            .or_insert_with(|| CartLine {
                item: product.clone(),
                qty: 1,
                price: product.unit_price(),
            });
        self.recompute();
    }

    /// Change a line's quantity by `delta`.
    ///
    /// Removes the line when the resulting quantity is zero or below.
    /// Returns `false` (and leaves the cart untouched) when no line exists
    /// for `product_id`.
    pub fn adjust_quantity(&mut self, product_id: &ProductId, delta: i64) -> bool {
        let Some(line) = self.items.get_mut(product_id) else {
            return false;
        };

        let next = i64::from(line.qty).saturating_add(delta);
        if next <= 0 {
            self.items.remove(product_id);
        } else {
            line.qty = u32::try_from(next).unwrap_or(u32::MAX);
        }
        self.recompute();
        true
    }

    /// Apply a single-step increase or decrease.
    pub fn apply(&mut self, product_id: &ProductId, change: QuantityChange) -> bool {
        self.adjust_quantity(product_id, change.delta())
    }

    /// Line items keyed by product ID.
    #[must_use]
    pub const fn items(&self) -> &BTreeMap<ProductId, CartLine> {
        &self.items
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.items.get(product_id)
    }

    /// Sum of line quantities.
    #[must_use]
    pub const fn total_qty(&self) -> u32 {
        self.total_qty
    }

    /// Sum of line subtotals.
    #[must_use]
    pub const fn total_price(&self) -> Price {
        self.total_price
    }

    /// Owner of the cart, when known.
    #[must_use]
    pub const fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check every line against the stock `stock` reports for its product.
    ///
    /// `stock` returns `None` for products that no longer exist; such lines
    /// are out of stock with nothing available.
    pub fn check_inventory(&self, stock: impl Fn(&ProductId) -> Option<u32>) -> InventoryCheck {
        let out_of_stock: Vec<OutOfStock> = self
            .items
            .iter()
            .filter_map(|(id, line)| {
                let available = stock(id).unwrap_or(0);
                (available < line.qty).then(|| OutOfStock {
                    product_id: id.clone(),
                    requested: line.qty,
                    available,
                })
            })
            .collect();

        InventoryCheck {
            valid: out_of_stock.is_empty(),
            out_of_stock,
        }
    }

    fn recompute(&mut self) {
        self.total_qty = self
            .items
            .values()
            .fold(0_u32, |sum, line| sum.saturating_add(line.qty));
        self.total_price = self.items.values().map(CartLine::subtotal).sum();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::product::tests::product;

    fn assert_consistent(cart: &Cart) {
        let qty: u32 = cart.items().values().map(|l| l.qty).sum();
        let price: Price = cart.items().values().map(|l| l.price.times(l.qty)).sum();
        assert_eq!(cart.total_qty(), qty);
        assert_eq!(cart.total_price(), price);
        assert!(cart.items().values().all(|l| l.qty > 0));
    }

    #[test]
    fn test_add_same_product_twice() {
        let mut cart = Cart::empty(UserId::new("u1"));
        let p1 = product("p1", 10000);
        cart.add_item(&p1);
        cart.add_item(&p1);

        assert_eq!(cart.line(&p1.id).unwrap().qty, 2);
        assert_eq!(cart.total_qty(), 2);
        assert_eq!(cart.total_price(), Price::from_cents(20000));
    }

    #[test]
    fn test_line_uses_discounted_price() {
        let mut cart = Cart::default();
        let mut p = product("p1", 10000);
        p.discounted_price = Some(Price::from_cents(8000));
        cart.add_item(&p);
        assert_eq!(cart.total_price(), Price::from_cents(8000));
    }

    #[test]
    fn test_decrement_to_zero_removes_line() {
        let mut cart = Cart::default();
        let p = product("p1", 500);
        cart.add_item(&p);
        assert!(cart.apply(&p.id, QuantityChange::Decrease));
        assert!(cart.is_empty());
        assert_eq!(cart.total_qty(), 0);
        assert_eq!(cart.total_price(), Price::ZERO);
    }

    #[test]
    fn test_large_negative_delta_removes_line() {
        let mut cart = Cart::default();
        let p = product("p1", 500);
        cart.add_item(&p);
        cart.add_item(&p);
        assert!(cart.adjust_quantity(&p.id, -10));
        assert!(cart.line(&p.id).is_none());
    }

    #[test]
    fn test_change_on_absent_item_is_noop() {
        let mut cart = Cart::default();
        let p = product("p1", 500);
        cart.add_item(&p);
        let before = cart.clone();
        assert!(!cart.apply(&ProductId::new("missing"), QuantityChange::Decrease));
        assert!(!cart.apply(&ProductId::new("missing"), QuantityChange::Increase));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_aggregates_hold_over_mixed_sequence() {
        let products = [product("a", 1999), product("b", 4550), product("c", 1)];
        let mut cart = Cart::default();

        // Deterministic pseudo-random walk over add/increase/decrease.
        let mut state: u32 = 0x2545_f491;
        for _ in 0..500 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let p = &products[(state % 3) as usize];
            match (state >> 8) % 3 {
                0 => cart.add_item(p),
                1 => {
                    cart.apply(&p.id, QuantityChange::Increase);
                }
                _ => {
                    cart.apply(&p.id, QuantityChange::Decrease);
                }
            }
            assert_consistent(&cart);
        }
    }

    #[test]
    fn test_deserialize_recomputes_aggregates() {
        let json = r#"{
            "items": {
                "p1": { "item": { "_id": "p1", "title": "Cap", "price": 10 }, "qty": 3, "price": 10 },
                "p2": { "item": { "_id": "p2", "title": "Tie", "price": 5 }, "qty": 0, "price": 5 }
            },
            "totalQty": 99,
            "totalPrice": 1.5,
            "userId": "u1"
        }"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.total_qty(), 3);
        assert_eq!(cart.total_price(), Price::from_cents(3000));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.user_id().unwrap().as_str(), "u1");
    }

    #[test]
    fn test_serializes_wire_field_names() {
        let mut cart = Cart::empty(UserId::new("u1"));
        cart.add_item(&product("p1", 250));
        let value = serde_json::to_value(&cart).unwrap();
        assert_eq!(value["totalQty"], 1);
        assert_eq!(value["totalPrice"], 2.5);
        assert_eq!(value["userId"], "u1");
        assert_eq!(value["items"]["p1"]["qty"], 1);
    }

    #[test]
    fn test_inventory_flags_short_and_missing_lines() {
        let mut cart = Cart::empty(UserId::new("u1"));
        let plenty = product("p1", 1000);
        let short = product("p2", 1000);
        let gone = product("p3", 1000);
        cart.add_item(&plenty);
        for _ in 0..3 {
            cart.add_item(&short);
        }
        cart.add_item(&gone);

        let check = cart.check_inventory(|id| match id.as_str() {
            "p1" => Some(10),
            "p2" => Some(2),
            _ => None,
        });
        assert!(!check.valid);
        assert_eq!(
            check.out_of_stock,
            vec![
                OutOfStock {
                    product_id: short.id.clone(),
                    requested: 3,
                    available: 2,
                },
                OutOfStock {
                    product_id: gone.id.clone(),
                    requested: 1,
                    available: 0,
                },
            ]
        );

        assert!(Cart::default().check_inventory(|_| None).valid);
    }
}
