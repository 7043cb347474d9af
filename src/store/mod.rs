//! # Foo Store
//!
//! Record access layer for the `foos` table.
//!
//! The store is consumed through the [`FooStore`] trait so the HTTP and
//! service layers never depend on PostgreSQL directly. Two adapters exist:
//! [`PgFooStore`] for production and [`InMemoryFooStore`] for tests and local
//! runs without a database.

pub mod errors;
pub mod memory;
pub mod migrations;
pub mod postgres;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryFooStore;
pub use postgres::PgFooStore;

/// A named record with a store-assigned identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Foo {
    pub id: i64,
    pub name: String,
}

/// Record access capability.
///
/// Every operation is a single round trip: no transactions, no locking, no
/// pagination. Concurrent updates to the same id are last-writer-wins.
#[async_trait]
pub trait FooStore: Send + Sync {
    /// All records, ordered by id ascending
    async fn list(&self) -> StoreResult<Vec<Foo>>;

    /// Insert a record and return it with its assigned id
    async fn create(&self, name: &str) -> StoreResult<Foo>;

    /// Remove EVERY record and return how many were removed.
    ///
    /// This is not scoped to a caller or a filter.
    async fn delete_all(&self) -> StoreResult<u64>;

    /// Rename the record with the given id.
    ///
    /// Fails with [`StoreError::NotFound`] when no record has that id.
    async fn update_by_id(&self, id: i64, name: &str) -> StoreResult<Foo>;
}
