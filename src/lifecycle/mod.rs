//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the stores behind the services.
//!
//! ## Dependency Injection via Context
//!
//! Stores are created without dependencies and receive them in `run(context)`. Each store's
//! context is the set of clients its delete hook consults, e.g. the User store gets the Order
//! client so it can refuse deleting a user who still has orders.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all services** - closes the sender side of each store channel
//! 2. **Stores detect closure** - `receiver.recv()` returns `None`
//! 3. **Stores release their context** - which closes the next channel down the graph
//! 4. **Await completion** - [`ShopSystem::shutdown`] waits for every store task
//!
//! ## Contents
//!
//! - [`ShopConfig`] - environment configuration
//! - [`ShopSystem`] - store wiring and shutdown
//! - [`seed_demo_data`] - the demo data set

pub mod config;
pub mod seed;
pub mod shop_system;

pub use config::*;
pub use seed::*;
pub use shop_system::*;
