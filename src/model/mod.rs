//! Pure data structures managed by the stores.
//!
//! Entities are created transient (`id: None`) and receive their id from the store on first
//! save. Equality and hashing of every entity go through its id, or the composite key for
//! [`OrderItem`], never through the other fields.

pub mod category;
pub mod ids;
pub mod order;
pub mod order_item;
pub mod order_status;
pub mod payment;
pub mod product;
pub mod user;

pub use category::*;
pub use ids::*;
pub use order::*;
pub use order_item::*;
pub use order_status::*;
pub use payment::*;
pub use product::*;
pub use user::*;
