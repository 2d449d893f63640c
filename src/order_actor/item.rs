//! Entity trait implementation for [`OrderItem`], keyed by its composite key.

use crate::model::{OrderItem, OrderItemKey};
use async_trait::async_trait;
use resource_store::Entity;

#[async_trait]
impl Entity for OrderItem {
    type Id = OrderItemKey;
    type Context = ();

    fn id(&self) -> Option<&OrderItemKey> {
        Some(&self.key)
    }

    fn assign_id(&mut self, id: OrderItemKey) {
        self.key = id;
    }

    fn merge_from(&mut self, source: Self) {
        self.quantity = source.quantity;
        self.price = source.price;
    }
}
