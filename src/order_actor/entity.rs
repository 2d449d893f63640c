//! Entity trait implementation for the Order domain type.

use crate::model::{Order, OrderId, OrderItem};
use async_trait::async_trait;
use resource_store::{Entity, Repository, ResourceClient, StoreError};

#[async_trait]
impl Entity for Order {
    type Id = OrderId;
    type Context = ResourceClient<OrderItem>;

    fn id(&self) -> Option<&OrderId> {
        self.id.as_ref()
    }

    fn assign_id(&mut self, id: OrderId) {
        self.id = Some(id);
    }

    /// Copies moment and client. Status only moves through payment.
    fn merge_from(&mut self, source: Self) {
        self.moment = source.moment;
        self.client_id = source.client_id;
    }

    /// Refuses deletion while the order still has items.
    async fn on_delete(&self, items: &ResourceClient<OrderItem>) -> Result<(), StoreError> {
        let Some(id) = self.id else {
            return Ok(());
        };
        let lines = items
            .find_all()
            .await?
            .iter()
            .filter(|item| item.order_id() == id)
            .count();
        if lines > 0 {
            return Err(StoreError::integrity(format!(
                "Order {id} is referenced by {lines} order item(s)"
            )));
        }
        Ok(())
    }
}
