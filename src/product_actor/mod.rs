//! # Product Store
//!
//! Binds [`Product`] to a sequential [`ResourceActor`]. A product may not be deleted while an
//! order item refers to it; the store receives the item client as context.

pub mod entity;

use crate::model::Product;
use resource_store::{ResourceActor, ResourceClient};

/// Creates the Product store and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::sequential(buffer_size)
}
