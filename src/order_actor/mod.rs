//! # Order Stores
//!
//! An order is spread over three stores:
//!
//! | Store | Key | Strategy |
//! |-------|-----|----------|
//! | [`Order`] | [`OrderId`](crate::model::OrderId) | sequential |
//! | [`OrderItem`] | [`OrderItemKey`](crate::model::OrderItemKey) | keyed (composite) |
//! | [`Payment`] | [`OrderId`](crate::model::OrderId) of the paid order | keyed (shared) |
//!
//! Keeping items in a keyed store makes "one item per (order, product)" a property of the map
//! itself: writing the same key twice replaces the line.
//!
//! ## Dependencies
//!
//! The order store needs the item client (`run(items)`) to refuse deleting an order that still
//! has lines. Items and payments have no dependencies (`run(())`).

pub mod entity;
pub mod item;
pub mod payment;

use crate::model::{Order, OrderItem, Payment};
use resource_store::{ResourceActor, ResourceClient};

/// Creates the Order store and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::sequential(buffer_size)
}

/// Creates the OrderItem store, keyed by [`OrderItemKey`](crate::model::OrderItemKey).
pub fn items(buffer_size: usize) -> (ResourceActor<OrderItem>, ResourceClient<OrderItem>) {
    ResourceActor::keyed(buffer_size)
}

/// Creates the Payment store, keyed by the id of the paid order.
pub fn payments(buffer_size: usize) -> (ResourceActor<Payment>, ResourceClient<Payment>) {
    ResourceActor::keyed(buffer_size)
}
