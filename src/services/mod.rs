//! # Services
//!
//! One service per aggregate root (User, Order, Product, Category). Services depend on
//! [`SharedRepository`](resource_store::SharedRepository) handles only, never on a concrete store,
//! and share the [`CrudService`] contract.
//!
//! Every operation returns [`ServiceError`]; [`ServiceError::status_code`] and [`ErrorBody`] give
//! the HTTP mapping a resource layer would apply:
//!
//! | Error | Status |
//! |-------|--------|
//! | `ResourceNotFound` | 404 |
//! | `DatabaseIntegrityViolation` | 400 |
//! | `PreconditionFailure` | 400 |
//! | `Store` | 503 |

pub mod category;
pub mod crud;
pub mod error;
pub mod order;
pub mod product;
pub mod user;

pub use category::CategoryService;
pub use crud::CrudService;
pub use error::{ErrorBody, ServiceError};
pub use order::OrderService;
pub use product::ProductService;
pub use user::UserService;
