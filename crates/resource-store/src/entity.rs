//! # Entity Trait
//!
//! The `Entity` trait is the contract every persisted record (User, Product, Order, …) implements
//! to be kept by a [`ResourceActor`](crate::ResourceActor). It fixes the identifier type, says how
//! the store reads and assigns that identifier, how an update is merged onto the persisted copy,
//! and which referential-integrity checks guard deletion.
//!
//! # Identity
//! Identity is the identifier and nothing else. An entity without an identifier is *transient*:
//! the store assigns one on the first [`save`](crate::Repository::save). Implementors are expected
//! to derive `PartialEq`/`Hash` from the identifier alone.
//!
//! # Provided Methods (Hooks)
//! [`Entity::on_delete`] has a default implementation that allows every deletion. Override it
//! to refuse deleting a record that other records still reference.

use crate::error::StoreError;
use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any persisted record must implement to be managed by a `ResourceActor`.
///
/// # Context
/// `Context` is injected into the store's run loop (see [`ResourceActor::run`](crate::ResourceActor::run))
/// and handed to every hook. Use it to reach other stores, e.g. to look for rows that still
/// reference the one being deleted. Use `()` if no dependencies are needed.
#[async_trait]
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    /// The identifier (or composite key) of this entity. Stores keep entities ordered by it.
    type Id: Ord + Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The runtime context (dependencies) injected into the store.
    type Context: Send + Sync;

    /// Returns the identifier, or `None` while the entity is transient.
    fn id(&self) -> Option<&Self::Id>;

    /// Stamps the identifier assigned by the store onto a transient entity.
    fn assign_id(&mut self, id: Self::Id);

    /// Copies every mutable field of `source` onto `self`.
    ///
    /// The identifier of `self` is left untouched; whatever identifier `source` carries is ignored.
    fn merge_from(&mut self, source: Self);

    /// Called before the entity is removed from the store.
    ///
    /// Returning an error (normally [`StoreError::IntegrityViolation`]) aborts the deletion and
    /// leaves the store unchanged.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Short type name of an entity (e.g. `"User"` instead of `"webshop::model::user::User"`).
pub fn entity_name<T: Entity>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}
