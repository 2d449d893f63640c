//! # Product Service
//!
//! CRUD over the catalogue. Before any write the service checks the price is not negative and
//! every listed category exists.

use crate::model::{Category, CategoryId, Product};
use crate::services::{CrudService, ServiceError};
use async_trait::async_trait;
use resource_store::SharedRepository;
use rust_decimal::Decimal;
use tracing::instrument;

#[derive(Clone)]
pub struct ProductService {
    products: SharedRepository<Product>,
    categories: SharedRepository<Category>,
}

impl ProductService {
    pub fn new(products: SharedRepository<Product>, categories: SharedRepository<Category>) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// Products listed under `category`, in id order.
    #[instrument(skip(self))]
    pub async fn find_by_category(&self, category: CategoryId) -> Result<Vec<Product>, ServiceError> {
        if !self.categories.exists_by_id(category).await? {
            return Err(ServiceError::not_found("Category", category));
        }
        let products = self.products.find_all().await?;
        Ok(products
            .into_iter()
            .filter(|product| product.belongs_to(category))
            .collect())
    }
}

#[async_trait]
impl CrudService<Product> for ProductService {
    fn repository(&self) -> &SharedRepository<Product> {
        &self.products
    }

    async fn validate(&self, product: &Product) -> Result<(), ServiceError> {
        if product.price < Decimal::ZERO {
            return Err(ServiceError::precondition(format!(
                "Product price must not be negative, got {}",
                product.price
            )));
        }
        for &category in &product.categories {
            if !self.categories.exists_by_id(category).await? {
                return Err(ServiceError::not_found("Category", category));
            }
        }
        Ok(())
    }
}
