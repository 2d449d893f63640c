//! Entity trait implementation for the User domain type.

use crate::model::{Order, User, UserId};
use async_trait::async_trait;
use resource_store::{Entity, Repository, ResourceClient, StoreError};

#[async_trait]
impl Entity for User {
    type Id = UserId;
    type Context = ResourceClient<Order>;

    fn id(&self) -> Option<&UserId> {
        self.id.as_ref()
    }

    fn assign_id(&mut self, id: UserId) {
        self.id = Some(id);
    }

    /// Copies the profile fields. The password is changed through its own flow, never by update.
    fn merge_from(&mut self, source: Self) {
        self.name = source.name;
        self.email = source.email;
        self.phone = source.phone;
    }

    /// Refuses deletion while any order names this user as its client.
    async fn on_delete(&self, orders: &ResourceClient<Order>) -> Result<(), StoreError> {
        let Some(id) = self.id else {
            return Ok(());
        };
        let placed = orders
            .find_all()
            .await?
            .iter()
            .filter(|order| order.client_id == id)
            .count();
        if placed > 0 {
            return Err(StoreError::integrity(format!(
                "User {id} is referenced by {placed} order(s)"
            )));
        }
        Ok(())
    }
}
