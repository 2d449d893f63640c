//! Entity trait implementation for the Product domain type.

use crate::model::{OrderItem, Product, ProductId};
use async_trait::async_trait;
use resource_store::{Entity, Repository, ResourceClient, StoreError};

#[async_trait]
impl Entity for Product {
    type Id = ProductId;
    type Context = ResourceClient<OrderItem>;

    fn id(&self) -> Option<&ProductId> {
        self.id.as_ref()
    }

    fn assign_id(&mut self, id: ProductId) {
        self.id = Some(id);
    }

    /// Copies every catalogue field, including the category set.
    fn merge_from(&mut self, source: Self) {
        self.name = source.name;
        self.description = source.description;
        self.price = source.price;
        self.img_url = source.img_url;
        self.categories = source.categories;
    }

    async fn on_delete(&self, items: &ResourceClient<OrderItem>) -> Result<(), StoreError> {
        let Some(id) = self.id else {
            return Ok(());
        };
        let ordered = items
            .find_all()
            .await?
            .iter()
            .filter(|item| item.product_id() == id)
            .count();
        if ordered > 0 {
            return Err(StoreError::integrity(format!(
                "Product {id} is referenced by {ordered} order item(s)"
            )));
        }
        Ok(())
    }
}
