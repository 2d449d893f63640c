//! Entity trait implementation for the Category domain type.

use crate::model::{Category, CategoryId, Product};
use async_trait::async_trait;
use resource_store::{Entity, Repository, ResourceClient, StoreError};

#[async_trait]
impl Entity for Category {
    type Id = CategoryId;
    type Context = ResourceClient<Product>;

    fn id(&self) -> Option<&CategoryId> {
        self.id.as_ref()
    }

    fn assign_id(&mut self, id: CategoryId) {
        self.id = Some(id);
    }

    fn merge_from(&mut self, source: Self) {
        self.name = source.name;
    }

    async fn on_delete(&self, products: &ResourceClient<Product>) -> Result<(), StoreError> {
        let Some(id) = self.id else {
            return Ok(());
        };
        let tagged = products
            .find_all()
            .await?
            .iter()
            .filter(|product| product.belongs_to(id))
            .count();
        if tagged > 0 {
            return Err(StoreError::integrity(format!(
                "Category {id} is referenced by {tagged} product(s)"
            )));
        }
        Ok(())
    }
}
