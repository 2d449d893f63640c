//! # Category Store
//!
//! Categories are numbered sequentially. Deleting one is refused while a product still lists
//! it, so the store runs with a [`ResourceClient<Product>`](resource_store::ResourceClient) as
//! context.

pub mod entity;

use crate::model::Category;
use resource_store::{ResourceActor, ResourceClient};

/// Creates the Category store and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Category>, ResourceClient<Category>) {
    ResourceActor::sequential(buffer_size)
}
