//! Category service. Deleting a category still listed by a product is refused by the store.

use crate::model::Category;
use crate::services::CrudService;
use resource_store::SharedRepository;

#[derive(Clone)]
pub struct CategoryService {
    categories: SharedRepository<Category>,
}

impl CategoryService {
    pub fn new(categories: SharedRepository<Category>) -> Self {
        Self { categories }
    }
}

impl CrudService<Category> for CategoryService {
    fn repository(&self) -> &SharedRepository<Category> {
        &self.categories
    }
}
