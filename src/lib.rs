//! # Webshop
//!
//! An e-commerce domain model (users, orders, products, categories, payments) behind a CRUD
//! service layer, persisted in actor-backed in-memory stores from the
//! [`resource_store`] crate.
//!
//! ## Module Tour
//!
//! ### 1. The Data ([`model`])
//! Plain entities with typed ids. Equality and hashing go through the id only.
//!
//! ### 2. The Stores ([`user_actor`], [`order_actor`], [`product_actor`], [`category_actor`])
//! [`Entity`](resource_store::Entity) implementations and store factories. Referential integrity
//! lives here: each store's delete hook refuses to remove an entity that is still referenced.
//!
//! ### 3. The Services ([`services`])
//! One service per aggregate root, sharing the [`CrudService`](services::CrudService) contract:
//! `find_all`, `find_by_id`, `insert`, `update`, `delete`. Services only see
//! [`SharedRepository`](resource_store::SharedRepository) handles, so tests inject a
//! [`MockStore`](resource_store::mock::MockStore) instead.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`ShopSystem`](lifecycle::ShopSystem) wires stores and services together and shuts them down.
//!
//! ## Running the Demo
//!
//! ```bash
//! SHOP_SEED_DEMO=true RUST_LOG=info cargo run
//! ```

pub mod category_actor;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod services;
pub mod user_actor;
