//! In-memory `FooStore` for tests and database-less runs.

use std::sync::RwLock;

use async_trait::async_trait;

use super::errors::{StoreError, StoreResult};
use super::{Foo, FooStore};

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Foo>,
    last_id: i64,
}

/// In-memory foo store.
///
/// Ids start at 1 and are never reused, matching a `BIGSERIAL` column.
#[derive(Debug, Default)]
pub struct InMemoryFooStore {
    table: RwLock<Table>,
}

impl InMemoryFooStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("Lock poisoned".to_string())
}

#[async_trait]
impl FooStore for InMemoryFooStore {
    async fn list(&self) -> StoreResult<Vec<Foo>> {
        let table = self.table.read().map_err(poisoned)?;
        let mut rows = table.rows.clone();
        rows.sort_by_key(|foo| foo.id);
        Ok(rows)
    }

    async fn create(&self, name: &str) -> StoreResult<Foo> {
        let mut table = self.table.write().map_err(poisoned)?;
        table.last_id += 1;

        let foo = Foo {
            id: table.last_id,
            name: name.to_string(),
        };
        table.rows.push(foo.clone());
        Ok(foo)
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let mut table = self.table.write().map_err(poisoned)?;
        let removed = table.rows.len() as u64;
        table.rows.clear();
        Ok(removed)
    }

    async fn update_by_id(&self, id: i64, name: &str) -> StoreResult<Foo> {
        let mut table = self.table.write().map_err(poisoned)?;

        match table.rows.iter_mut().find(|foo| foo.id == id) {
            Some(existing) => {
                existing.name = name.to_string();
                Ok(existing.clone())
            }
            None => Err(StoreError::NotFound { id }),
        }
    }
}
