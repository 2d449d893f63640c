//! # CRUD Service Contract
//!
//! [`CrudService`] implements the five operations every aggregate root exposes, once, on top of
//! an injected [`SharedRepository`]. A concrete service supplies its repository and, where
//! needed, a [`validate`](CrudService::validate) rule; it may override any operation that needs
//! more (e.g. `OrderService::delete` also removes the payment).
//!
//! | Operation | Store calls | Failure |
//! |-----------|-------------|---------|
//! | `find_all` | `find_all` | store unavailable |
//! | `find_by_id` | `find_by_id` | `ResourceNotFound` |
//! | `insert` | `save` | `PreconditionFailure` for `None` or an entity that has an id |
//! | `update` | `find_by_id`, `save` | `PreconditionFailure` for `None`, `ResourceNotFound` |
//! | `delete` | `exists_by_id`, `delete_by_id` | `ResourceNotFound`, `DatabaseIntegrityViolation` |

use crate::services::ServiceError;
use async_trait::async_trait;
use resource_store::{entity_name, Entity, SharedRepository};
use tracing::debug;

/// Create/read/update/delete for one entity type.
#[async_trait]
pub trait CrudService<T: Entity>: Send + Sync {
    /// The store this service writes to.
    fn repository(&self) -> &SharedRepository<T>;

    /// Checks values and references before a write. Runs after the entity is known to be present.
    async fn validate(&self, _entity: &T) -> Result<(), ServiceError> {
        Ok(())
    }

    /// Every persisted entity, in ascending id order.
    async fn find_all(&self) -> Result<Vec<T>, ServiceError> {
        let all = self.repository().find_all().await?;
        debug!(entity_type = entity_name::<T>(), count = all.len(), "find_all");
        Ok(all)
    }

    async fn find_by_id(&self, id: T::Id) -> Result<T, ServiceError> {
        debug!(entity_type = entity_name::<T>(), %id, "find_by_id");
        self.repository()
            .find_by_id(id.clone())
            .await?
            .ok_or_else(|| ServiceError::not_found(entity_name::<T>(), id))
    }

    /// Persists a transient entity and returns it with its new id.
    async fn insert(&self, entity: Option<T>) -> Result<T, ServiceError> {
        let entity_type = entity_name::<T>();
        let entity = entity
            .ok_or_else(|| ServiceError::precondition(format!("{entity_type} must not be null")))?;
        if let Some(id) = entity.id() {
            return Err(ServiceError::precondition(format!(
                "{entity_type} already has id {id}; insert only accepts new entities"
            )));
        }
        self.validate(&entity).await?;
        let saved = self.repository().save(entity).await?;
        debug!(entity_type, id = ?saved.id(), "inserted");
        Ok(saved)
    }

    /// Copies the mutable fields of `source` onto the stored entity and saves the result.
    ///
    /// The stored id is kept whatever `source` carries.
    async fn update(&self, id: T::Id, source: Option<T>) -> Result<T, ServiceError> {
        let entity_type = entity_name::<T>();
        let source = source
            .ok_or_else(|| ServiceError::precondition(format!("{entity_type} must not be null")))?;
        let mut current = self.find_by_id(id).await?;
        current.merge_from(source);
        self.validate(&current).await?;
        let saved = self.repository().save(current).await?;
        debug!(entity_type, id = ?saved.id(), "updated");
        Ok(saved)
    }

    /// Removes the entity; a store refusal because of remaining references surfaces as
    /// [`ServiceError::DatabaseIntegrityViolation`].
    async fn delete(&self, id: T::Id) -> Result<(), ServiceError> {
        let entity_type = entity_name::<T>();
        if !self.repository().exists_by_id(id.clone()).await? {
            return Err(ServiceError::not_found(entity_type, id));
        }
        self.repository().delete_by_id(id.clone()).await?;
        debug!(entity_type, %id, "deleted");
        Ok(())
    }
}
