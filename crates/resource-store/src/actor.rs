//! # Store Actor
//!
//! This module defines the `ResourceActor`, the server half of a store. It owns the entities of
//! one type, processes requests sequentially and guarantees exclusive access to its map.

use crate::client::ResourceClient;
use crate::entity::{entity_name, Entity};
use crate::error::StoreError;
use crate::message::StoreRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

type IdGenerator<Id> = Box<dyn FnMut() -> Id + Send>;

/// The generic store that owns a collection of entities.
///
/// # Architecture Note
/// Each store runs in its own Tokio task and handles one request at a time, so every request is
/// atomic with respect to the others and the map needs no `Mutex`. Entities are kept in a
/// `BTreeMap`, which makes "store order" ascending key order.
///
/// # Key Strategies
///
/// * [`ResourceActor::sequential`]: the store numbers transient entities 1, 2, 3, … Saving an
///   entity that carries an id the store does not hold fails with [`StoreError::NotFound`], so a
///   deleted id is never handed out or resurrected.
/// * [`ResourceActor::keyed`]: the caller supplies the key (e.g. a composite key). Saving upserts
///   under that key; saving without a key fails with [`StoreError::MissingKey`].
///
/// # Usage Pattern
///
/// 1.  **Create**: call a constructor to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use async_trait::async_trait;
/// use resource_store::{Entity, Repository, ResourceActor};
///
/// #[derive(Clone, Debug)]
/// struct Tag { id: Option<u64>, label: String }
///
/// #[async_trait]
/// impl Entity for Tag {
///     type Id = u64;
///     type Context = ();
///     fn id(&self) -> Option<&u64> { self.id.as_ref() }
///     fn assign_id(&mut self, id: u64) { self.id = Some(id); }
///     fn merge_from(&mut self, source: Self) { self.label = source.label; }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Tag>::sequential(10);
///     tokio::spawn(actor.run(()));
///
///     let saved = client.save(Tag { id: None, label: "new".into() }).await.unwrap();
///     assert_eq!(saved.id, Some(1));
///     assert!(client.exists_by_id(1).await.unwrap());
/// }
/// ```
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: Option<IdGenerator<T::Id>>,
}

impl<T: Entity> ResourceActor<T> {
    /// Creates a store whose keys are always supplied by the caller.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full, clients wait.
    pub fn keyed(buffer_size: usize) -> (Self, ResourceClient<T>) {
        Self::build(buffer_size, None)
    }

    /// Creates a store that assigns ids to transient entities with `next_id`.
    pub fn with_id_generator(
        buffer_size: usize,
        next_id: impl FnMut() -> T::Id + Send + 'static,
    ) -> (Self, ResourceClient<T>) {
        Self::build(buffer_size, Some(Box::new(next_id)))
    }

    fn build(buffer_size: usize, next_id: Option<IdGenerator<T::Id>>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the store's event loop, processing requests until every client is dropped.
    ///
    /// # Context Injection
    /// `context` is handed to every [`Entity::on_delete`] hook. This allows a store to consult
    /// other stores that were created *after* it but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = entity_name::<T>();
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::FindAll { respond_to } => {
                    let items: Vec<T> = self.store.values().cloned().collect();
                    debug!(entity_type, count = items.len(), "FindAll");
                    let _ = respond_to.send(Ok(items));
                }
                StoreRequest::FindById { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "FindById");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Save { entity, respond_to } => {
                    debug!(entity_type, ?entity, "Save");
                    let result = self.save(entity);
                    match &result {
                        Ok(saved) => {
                            if let Some(id) = saved.id() {
                                info!(entity_type, %id, size = self.store.len(), "Saved");
                            }
                        }
                        Err(e) => warn!(entity_type, error = %e, "Save failed"),
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::DeleteById { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete refused");
                            let _ = respond_to.send(Err(e));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::not_found(entity_type, &id)));
                    }
                }
                StoreRequest::ExistsById { id, respond_to } => {
                    let exists = self.store.contains_key(&id);
                    debug!(entity_type, %id, exists, "ExistsById");
                    let _ = respond_to.send(Ok(exists));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    fn save(&mut self, mut entity: T) -> Result<T, StoreError> {
        let entity_type = entity_name::<T>();
        let id = match (entity.id().cloned(), self.next_id.as_mut()) {
            (Some(id), Some(_)) if !self.store.contains_key(&id) => {
                return Err(StoreError::not_found(entity_type, &id));
            }
            (Some(id), _) => id,
            (None, Some(next_id)) => {
                let id = next_id();
                entity.assign_id(id.clone());
                id
            }
            (None, None) => return Err(StoreError::MissingKey(entity_type)),
        };
        self.store.insert(id, entity.clone());
        Ok(entity)
    }
}

impl<T: Entity> ResourceActor<T>
where
    T::Id: From<u64>,
{
    /// Creates a store that numbers transient entities 1, 2, 3, …
    pub fn sequential(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let mut next = 1u64;
        Self::with_id_generator(buffer_size, move || {
            let id = next;
            next += 1;
            T::Id::from(id)
        })
    }
}
