//! # Store Messages
//!
//! The request type sent from a [`ResourceClient`](crate::ResourceClient) to its
//! [`ResourceActor`](crate::ResourceActor).

use crate::entity::Entity;
use crate::error::StoreError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by stores.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Internal message type sent to the store to request operations.
///
/// The variants map one-to-one onto the [`Repository`](crate::Repository) capability set:
///
/// - **FindAll**: every stored entity, in key order.
/// - **FindById**: one entity, or `None`.
/// - **Save**: insert a transient entity (assigning its id) or replace a persisted one.
/// - **DeleteById**: remove an entity after its [`Entity::on_delete`] hook agreed.
/// - **ExistsById**: presence check without cloning the entity.
#[derive(Debug)]
pub enum StoreRequest<T: Entity> {
    FindAll {
        respond_to: Response<Vec<T>>,
    },
    FindById {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Save {
        entity: T,
        respond_to: Response<T>,
    },
    DeleteById {
        id: T::Id,
        respond_to: Response<()>,
    },
    ExistsById {
        id: T::Id,
        respond_to: Response<bool>,
    },
}
