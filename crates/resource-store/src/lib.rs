//! # Resource Store
//!
//! Building blocks for keeping typed entities behind a repository interface. Every entity type
//! gets its own store: a Tokio task that owns an ordered map and serves requests sent through a
//! cloneable client. Services depend only on the [`Repository`] trait, so tests can swap in a
//! fresh store or a [`MockStore`](mock::MockStore).
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`Entity`]): identity, merge rule and delete hook of a record type.
//! 2. **Runtime Layer** ([`ResourceActor`]): request processing and id assignment.
//! 3. **Interface Layer** ([`ResourceClient`], [`Repository`]): type-safe access.
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via [`ResourceActor::run`], not at construction
//! time. A store that must refuse deleting referenced rows receives clients of the stores that
//! hold the references:
//!
//! ```rust
//! use async_trait::async_trait;
//! use resource_store::{Entity, Repository, ResourceActor, ResourceClient, StoreError};
//!
//! #[derive(Clone, Debug)]
//! struct Author { id: Option<u64>, name: String }
//!
//! #[derive(Clone, Debug)]
//! struct Book { id: Option<u64>, author: u64 }
//!
//! #[async_trait]
//! impl Entity for Book {
//!     type Id = u64;
//!     type Context = ();
//!     fn id(&self) -> Option<&u64> { self.id.as_ref() }
//!     fn assign_id(&mut self, id: u64) { self.id = Some(id); }
//!     fn merge_from(&mut self, source: Self) { self.author = source.author; }
//! }
//!
//! #[async_trait]
//! impl Entity for Author {
//!     type Id = u64;
//!     type Context = ResourceClient<Book>;
//!     fn id(&self) -> Option<&u64> { self.id.as_ref() }
//!     fn assign_id(&mut self, id: u64) { self.id = Some(id); }
//!     fn merge_from(&mut self, source: Self) { self.name = source.name; }
//!
//!     async fn on_delete(&self, books: &ResourceClient<Book>) -> Result<(), StoreError> {
//!         let referenced = books.find_all().await?.iter().any(|b| Some(&b.author) == self.id());
//!         if referenced {
//!             return Err(StoreError::integrity("author still has books"));
//!         }
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (book_actor, books) = ResourceActor::<Book>::sequential(10);
//!     let (author_actor, authors) = ResourceActor::<Author>::sequential(10);
//!     tokio::spawn(book_actor.run(()));
//!     tokio::spawn(author_actor.run(books.clone()));
//!
//!     let author = authors.save(Author { id: None, name: "Ann".into() }).await.unwrap();
//!     books.save(Book { id: None, author: 1 }).await.unwrap();
//!
//!     assert!(matches!(
//!         authors.delete_by_id(1).await,
//!         Err(StoreError::IntegrityViolation(_))
//!     ));
//!     assert_eq!(author.id, Some(1));
//! }
//! ```
//!
//! The dependency graph between stores must be **acyclic**: a hook awaits another store while
//! its own store is blocked, and shutdown relies on clients being dropped in dependency order.
//!
//! ## Concurrency Model
//!
//! - Each store runs in its own Tokio task.
//! - Requests are processed **sequentially** within a store, so each one is atomic.
//! - Different stores run in **parallel**.
//! - Two concurrent saves of the same id resolve last-write-wins.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod repository;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use entity::{entity_name, Entity};
pub use error::StoreError;
pub use message::{Response, StoreRequest};
pub use repository::{Repository, SharedRepository};
