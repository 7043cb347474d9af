//! # Foo Service
//!
//! Orchestration between the request layer and the record access layer.
//! Calls are forwarded unchanged; failures gain a per-call-site tag.

pub mod errors;

use std::sync::Arc;

use crate::store::{Foo, FooStore};

pub use errors::{ServiceError, ServiceResult};

/// Foo CRUD service
#[derive(Clone)]
pub struct FooService {
    store: Arc<dyn FooStore>,
}

impl FooService {
    pub fn new(store: Arc<dyn FooStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Foo>> {
        self.store
            .list()
            .await
            .map_err(|e| ServiceError::wrap("WZDCXT", "Getting foos.", e))
    }

    pub async fn create(&self, name: &str) -> ServiceResult<Foo> {
        self.store
            .create(name)
            .await
            .map_err(|e| ServiceError::wrap("DWA4G7", "Creating foos.", e))
    }

    /// Delete every foo. See [`FooStore::delete_all`].
    pub async fn delete_all(&self) -> ServiceResult<u64> {
        self.store
            .delete_all()
            .await
            .map_err(|e| ServiceError::wrap("BA8TAX", "Deleting foos.", e))
    }

    pub async fn update_by_id(&self, id: i64, name: &str) -> ServiceResult<Foo> {
        self.store
            .update_by_id(id, name)
            .await
            .map_err(|e| ServiceError::wrap("GZNHKW", "Updating foos.", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryFooStore, StoreError, StoreResult};
    use async_trait::async_trait;
    use std::error::Error;

    /// Store whose every call fails
    struct BrokenStore;

    #[async_trait]
    impl FooStore for BrokenStore {
        async fn list(&self) -> StoreResult<Vec<Foo>> {
            Err(StoreError::Query(sqlx::Error::PoolTimedOut))
        }

        async fn create(&self, _name: &str) -> StoreResult<Foo> {
            Err(StoreError::Insert(sqlx::Error::PoolTimedOut))
        }

        async fn delete_all(&self) -> StoreResult<u64> {
            Err(StoreError::Delete(sqlx::Error::PoolClosed))
        }

        async fn update_by_id(&self, _id: i64, _name: &str) -> StoreResult<Foo> {
            Err(StoreError::Update(sqlx::Error::PoolClosed))
        }
    }

    fn service() -> FooService {
        FooService::new(Arc::new(InMemoryFooStore::new()))
    }

    #[tokio::test]
    async fn test_forwards_successful_calls() {
        let service = service();

        let foo = service.create("Ada").await.unwrap();
        let renamed = service.update_by_id(foo.id, "Grace").await.unwrap();
        assert_eq!(renamed, Foo { id: foo.id, name: "Grace".to_string() });

        assert_eq!(service.list().await.unwrap(), vec![renamed]);
        assert_eq!(service.delete_all().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_errors_are_tagged_per_call_site() {
        let service = FooService::new(Arc::new(BrokenStore));

        assert_eq!(service.list().await.unwrap_err().tag(), "WZDCXT");
        assert_eq!(service.create("x").await.unwrap_err().tag(), "DWA4G7");
        assert_eq!(service.delete_all().await.unwrap_err().tag(), "BA8TAX");
        assert_eq!(service.update_by_id(1, "x").await.unwrap_err().tag(), "GZNHKW");
    }

    #[tokio::test]
    async fn test_wrapping_keeps_the_store_error_as_source() {
        let service = FooService::new(Arc::new(BrokenStore));

        let err = service.list().await.unwrap_err();
        assert_eq!(err.to_string(), "Error: WZDCXT - Getting foos.");

        let source = err.source().unwrap().to_string();
        assert!(source.contains("30UUBR"));
    }

    #[tokio::test]
    async fn test_not_found_is_visible_through_the_wrapper() {
        let service = service();

        let err = service.update_by_id(7, "Grace").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err.store_error(), StoreError::NotFound { id: 7 }));
    }
}
