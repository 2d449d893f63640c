//! # Store Client
//!
//! The client half of a store: forwards [`Repository`] calls to a [`ResourceActor`](crate::ResourceActor).

use crate::entity::Entity;
use crate::error::StoreError;
use crate::message::{Response, StoreRequest};
use crate::repository::{Repository, SharedRepository};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// ## ResourceClient
///
/// The `ResourceClient<T>` is a type-safe, async handle on a `ResourceActor<T>`. It sends
/// [`StoreRequest`]s over a Tokio mpsc channel and awaits the reply on a oneshot channel.
///
/// * **Cloneable**: holds only a sender, so cloning is inexpensive.
/// * **Shutdown**: the store stops once every clone has been dropped.
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    /// Wraps a clone of this client as an injectable [`SharedRepository`].
    pub fn shared(&self) -> SharedRepository<T> {
        Arc::new(self.clone())
    }

    async fn request<R: Send>(
        &self,
        build: impl FnOnce(Response<R>) -> StoreRequest<T> + Send,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for ResourceClient<T> {
    async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| StoreRequest::FindAll { respond_to })
            .await
    }

    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::FindById { id, respond_to })
            .await
    }

    async fn save(&self, entity: T) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Save { entity, respond_to })
            .await
    }

    async fn delete_by_id(&self, id: T::Id) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::DeleteById { id, respond_to })
            .await
    }

    async fn exists_by_id(&self, id: T::Id) -> Result<bool, StoreError> {
        self.request(|respond_to| StoreRequest::ExistsById { id, respond_to })
            .await
    }
}
