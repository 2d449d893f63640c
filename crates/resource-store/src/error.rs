//! # Store Errors
//!
//! Errors raised by a store or by the channel between a [`ResourceClient`](crate::ResourceClient)
//! and its [`ResourceActor`](crate::ResourceActor).

use thiserror::Error;

/// Errors that can occur within the store itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store task is gone; requests can no longer be delivered.
    #[error("Store closed")]
    ActorClosed,

    /// The store accepted the request but dropped the response channel.
    #[error("Store dropped response channel")]
    ActorDropped,

    /// No entity is stored under the given identifier.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A keyed store was asked to save an entity without a key.
    #[error("{0} has no key")]
    MissingKey(&'static str),

    /// The write or delete would break a reference held by another entity.
    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn integrity(reason: impl Into<String>) -> Self {
        Self::IntegrityViolation(reason.into())
    }
}
