//! # Mock Store & Testing Guide
//!
//! `MockStore<T>` hands out a real [`ResourceClient<T>`] whose requests are answered from a queue
//! of expectations instead of a map. It lets you test service logic (existence checks, merge
//! rules, error translation) deterministically and assert exactly which store calls were made.
//!
//! ## When to use Mocks vs Real Stores
//!
//! | Feature | MockStore | Real Store |
//! |---------|-----------|------------|
//! | **State** | None (scripted replies) | Real entities |
//! | **Error Injection** | Easy (`return_err`) | Needs real referencing rows |
//! | **Call assertions** | `verify()` + `saved()` | Not available |
//! | **Use Case** | Unit testing a service | Scenario/integration tests |
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use resource_store::mock::MockStore;
//! use resource_store::{Entity, Repository};
//!
//! #[derive(Clone, Debug)]
//! struct Tag { id: Option<u64>, label: String }
//!
//! #[async_trait]
//! impl Entity for Tag {
//!     type Id = u64;
//!     type Context = ();
//!     fn id(&self) -> Option<&u64> { self.id.as_ref() }
//!     fn assign_id(&mut self, id: u64) { self.id = Some(id); }
//!     fn merge_from(&mut self, source: Self) { self.label = source.label; }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockStore::<Tag>::new();
//!     mock.expect_exists_by_id(3).return_ok(false);
//!
//!     let repository = mock.shared();
//!     assert!(!repository.exists_by_id(3).await.unwrap());
//!
//!     mock.verify();
//! }
//! ```
//!
//! Any request that does not match the next expectation is recorded. Its caller receives
//! [`StoreError::ActorDropped`], and [`MockStore::verify`] fails.

use crate::client::ResourceClient;
use crate::entity::Entity;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::repository::SharedRepository;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

type SaveReply<T> = Box<dyn FnOnce(T) -> Result<T, StoreError> + Send>;
type Shared<V> = Arc<Mutex<V>>;

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// An expected request and the reply to send back.
enum Expectation<T: Entity> {
    FindAll {
        response: Result<Vec<T>, StoreError>,
    },
    FindById {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    Save {
        reply: SaveReply<T>,
    },
    DeleteById {
        id: T::Id,
        response: Result<(), StoreError>,
    },
    ExistsById {
        id: T::Id,
        response: Result<bool, StoreError>,
    },
}

/// A mock store with expectation tracking for fluent testing.
pub struct MockStore<T: Entity> {
    client: ResourceClient<T>,
    expectations: Shared<VecDeque<Expectation<T>>>,
    saved: Shared<Vec<T>>,
    unexpected: Shared<Vec<String>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Entity> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MockStore<T> {
    /// Creates a new mock store with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Shared<VecDeque<Expectation<T>>> = Arc::default();
        let saved: Shared<Vec<T>> = Arc::default();
        let unexpected: Shared<Vec<String>> = Arc::default();

        let task_expectations = expectations.clone();
        let task_saved = saved.clone();
        let task_unexpected = unexpected.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&task_expectations).pop_front();

                match (request, expectation) {
                    (StoreRequest::FindAll { respond_to }, Some(Expectation::FindAll { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::FindById { id, respond_to },
                        Some(Expectation::FindById { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Save { entity, respond_to }, Some(Expectation::Save { reply })) => {
                        lock(&task_saved).push(entity.clone());
                        let _ = respond_to.send(reply(entity));
                    }
                    (
                        StoreRequest::DeleteById { id, respond_to },
                        Some(Expectation::DeleteById { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::ExistsById { id, respond_to },
                        Some(Expectation::ExistsById { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        lock(&task_unexpected).push(format!("{request:?}"));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            saved,
            unexpected,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Returns the client as an injectable repository.
    pub fn shared(&self) -> SharedRepository<T> {
        self.client.shared()
    }

    /// Expects a `find_all` call.
    pub fn expect_find_all(&self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::FindAll { response })
    }

    /// Expects a `find_by_id` call for `id`.
    pub fn expect_find_by_id(&self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::FindById { id, response })
    }

    /// Expects a `save` call.
    pub fn expect_save(&self) -> SaveExpectationBuilder<T> {
        SaveExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `delete_by_id` call for `id`.
    pub fn expect_delete_by_id(&self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::DeleteById { id, response })
    }

    /// Expects an `exists_by_id` call for `id`.
    pub fn expect_exists_by_id(&self, id: T::Id) -> ExpectationBuilder<T, bool> {
        self.builder(move |response| Expectation::ExistsById { id, response })
    }

    /// Every entity passed to `save`, in call order.
    pub fn saved(&self) -> Vec<T> {
        lock(&self.saved).clone()
    }

    /// Verifies that all expectations were met and nothing else was requested.
    pub fn verify(&self) {
        let unexpected = lock(&self.unexpected);
        if !unexpected.is_empty() {
            panic!("Unexpected store requests: {unexpected:?}");
        }
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn builder<R>(
        &self,
        make: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            make: Box::new(make),
        }
    }
}

/// Builder for read and delete expectations.
pub struct ExpectationBuilder<T: Entity, R> {
    expectations: Shared<VecDeque<Expectation<T>>>,
    make: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + Send>,
}

impl<T: Entity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        let expectation = (self.make)(Ok(value));
        lock(&self.expectations).push_back(expectation);
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        let expectation = (self.make)(Err(error));
        lock(&self.expectations).push_back(expectation);
    }
}

/// Builder for `save` expectations.
pub struct SaveExpectationBuilder<T: Entity> {
    expectations: Shared<VecDeque<Expectation<T>>>,
}

impl<T: Entity> SaveExpectationBuilder<T> {
    /// Replies with `value` whatever was saved.
    pub fn return_ok(self, value: T) {
        self.reply(Box::new(move |_: T| Ok(value)));
    }

    /// Replies with the saved entity unchanged.
    pub fn echo(self) {
        self.reply(Box::new(|entity: T| Ok(entity)));
    }

    /// Replies with the saved entity after stamping `id` on it, like a sequential store.
    pub fn assign_id(self, id: T::Id) {
        self.reply(Box::new(move |mut entity: T| {
            entity.assign_id(id);
            Ok(entity)
        }));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        self.reply(Box::new(move |_: T| Err(error)));
    }

    fn reply(self, reply: SaveReply<T>) {
        lock(&self.expectations).push_back(Expectation::Save { reply });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repository;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Tag {
        id: Option<u32>,
        label: String,
    }

    #[async_trait]
    impl Entity for Tag {
        type Id = u32;
        type Context = ();

        fn id(&self) -> Option<&u32> {
            self.id.as_ref()
        }

        fn assign_id(&mut self, id: u32) {
            self.id = Some(id);
        }

        fn merge_from(&mut self, source: Self) {
            self.label = source.label;
        }
    }

    #[tokio::test]
    async fn scripted_replies_are_returned_in_order() {
        let mock = MockStore::<Tag>::new();
        mock.expect_exists_by_id(1).return_ok(true);
        mock.expect_save().assign_id(9);
        mock.expect_delete_by_id(1)
            .return_err(StoreError::integrity("still referenced"));

        let repository = mock.shared();
        assert!(repository.exists_by_id(1).await.unwrap());

        let saved = repository
            .save(Tag {
                id: None,
                label: "x".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(saved.id, Some(9));
        assert_eq!(mock.saved()[0].id, None);

        assert_eq!(
            repository.delete_by_id(1).await,
            Err(StoreError::integrity("still referenced"))
        );
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected store requests")]
    async fn verify_fails_on_unscripted_request() {
        let mock = MockStore::<Tag>::new();
        let repository = mock.shared();

        assert_eq!(
            repository.find_all().await,
            Err(StoreError::ActorDropped)
        );
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn verify_fails_on_unused_expectation() {
        let mock = MockStore::<Tag>::new();
        mock.expect_find_all().return_ok(Vec::new());
        mock.verify();
    }
}
