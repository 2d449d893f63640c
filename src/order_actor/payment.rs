//! Entity trait implementation for [`Payment`], which shares its key with the order it pays.

use crate::model::{OrderId, Payment};
use async_trait::async_trait;
use resource_store::Entity;

#[async_trait]
impl Entity for Payment {
    type Id = OrderId;
    type Context = ();

    fn id(&self) -> Option<&OrderId> {
        Some(&self.order_id)
    }

    fn assign_id(&mut self, id: OrderId) {
        self.order_id = id;
    }

    fn merge_from(&mut self, source: Self) {
        self.moment = source.moment;
    }
}
