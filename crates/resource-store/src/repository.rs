//! # Repository Trait
//!
//! The capability set a service needs from persistence. Services hold it as an injected
//! [`SharedRepository`] so a real store, a fresh in-memory store or a
//! [`MockStore`](crate::mock::MockStore) can be swapped in.

use crate::entity::Entity;
use crate::error::StoreError;
use async_trait::async_trait;
use std::sync::Arc;

/// Per-entity persistence capabilities.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Every stored entity, in store order.
    async fn find_all(&self) -> Result<Vec<T>, StoreError>;

    /// The entity stored under `id`, if any.
    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, StoreError>;

    /// Inserts a transient entity or replaces a persisted one; returns what was stored.
    async fn save(&self, entity: T) -> Result<T, StoreError>;

    /// Removes the entity stored under `id`.
    ///
    /// Fails with [`StoreError::NotFound`] when absent and [`StoreError::IntegrityViolation`]
    /// when another entity still references it.
    async fn delete_by_id(&self, id: T::Id) -> Result<(), StoreError>;

    /// Whether an entity is stored under `id`.
    async fn exists_by_id(&self, id: T::Id) -> Result<bool, StoreError>;
}

/// Repository handle as injected into services.
pub type SharedRepository<T> = Arc<dyn Repository<T>>;
