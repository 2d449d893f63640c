//! # User Store
//!
//! Binds [`User`] to a sequential [`ResourceActor`].
//!
//! ## Structure
//!
//! - [`entity`] - [`Entity`](resource_store::Entity) implementation for [`User`]
//! - [`new()`] - Factory function that creates the store and its client
//!
//! ## Usage
//!
//! ```rust
//! use resource_store::Repository;
//! use webshop::model::User;
//! use webshop::{order_actor, user_actor};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (item_store, items) = order_actor::items(8);
//!     let (order_store, orders) = order_actor::new(8);
//!     let (user_store, users) = user_actor::new(8);
//!
//!     // A user may not be deleted while orders reference it, so the store needs the order client.
//!     tokio::spawn(item_store.run(()));
//!     tokio::spawn(order_store.run(items));
//!     tokio::spawn(user_store.run(orders));
//!
//!     let maria = users
//!         .save(User::new("Maria Brown", "maria@gmail.com", "988888888", "123456"))
//!         .await
//!         .unwrap();
//!     assert_eq!(maria.id.map(|id| id.value()), Some(1));
//! }
//! ```

pub mod entity;

use crate::model::User;
use resource_store::{ResourceActor, ResourceClient};

/// Creates the User store and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, ResourceClient<User>) {
    ResourceActor::sequential(buffer_size)
}
