use crate::model::{OrderId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Composite key of an [`OrderItem`]: the order and the product it refers to.
///
/// The components are private and have no setters. Once a key is built its hash and ordering
/// cannot change, so it is safe to use as a map key from the start.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct OrderItemKey {
    order_id: OrderId,
    product_id: ProductId,
}

impl OrderItemKey {
    pub const fn new(order_id: OrderId, product_id: ProductId) -> Self {
        Self {
            order_id,
            product_id,
        }
    }

    pub const fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub const fn product_id(&self) -> ProductId {
        self.product_id
    }
}

impl fmt::Display for OrderItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.order_id, self.product_id)
    }
}

/// One line of an order: a product, how many, and the unit price paid.
///
/// `price` is captured when the line is written and does not follow later product price changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderItem {
    pub key: OrderItemKey,
    pub quantity: u32,
    pub price: Decimal,
}

impl OrderItem {
    pub fn new(order_id: OrderId, product_id: ProductId, quantity: u32, price: Decimal) -> Self {
        Self {
            key: OrderItemKey::new(order_id, product_id),
            quantity,
            price,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.key.order_id()
    }

    pub fn product_id(&self) -> ProductId {
        self.key.product_id()
    }

    /// Moves the item to another product. The whole key is replaced.
    pub fn set_product(&mut self, product_id: ProductId) {
        self.key = OrderItemKey::new(self.key.order_id(), product_id);
    }

    /// `price × quantity`.
    pub fn sub_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

impl PartialEq for OrderItem {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for OrderItem {}

impl Hash for OrderItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
