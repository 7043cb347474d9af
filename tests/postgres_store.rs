//! PostgreSQL Store Tests
//!
//! Run only when `TEST_DATABASE_URL` points at a disposable database. The
//! migrations are applied and the `foos` table is cleared first.

use foopoc::config::DatabaseConfig;
use foopoc::store::{migrations, postgres, FooStore, PgFooStore};

/// Test database URL environment variable.
const TEST_DATABASE_URL_ENV: &str = "TEST_DATABASE_URL";

async fn test_store() -> Option<PgFooStore> {
    let url = std::env::var(TEST_DATABASE_URL_ENV).ok()?;
    let config = DatabaseConfig {
        url,
        max_connections: 2,
        acquire_timeout_secs: 5,
    };

    let pool = postgres::connect(&config)
        .await
        .expect("Failed to connect to test database");
    migrations::run(&pool).await.expect("Failed to migrate");

    Some(PgFooStore::new(pool))
}

// All assertions share one table, so they run as one sequential test.
#[tokio::test]
async fn postgres_store_crud_lifecycle() {
    let Some(store) = test_store().await else {
        eprintln!("{TEST_DATABASE_URL_ENV} not set, skipping");
        return;
    };

    store.delete_all().await.unwrap();
    assert!(store.list().await.unwrap().is_empty());
    assert_eq!(store.delete_all().await.unwrap(), 0);

    let ada = store.create("Ada").await.unwrap();
    let grace = store.create("Grace").await.unwrap();
    assert_eq!(ada.name, "Ada");
    assert!(grace.id > ada.id);

    let listed = store.list().await.unwrap();
    assert_eq!(listed, vec![ada.clone(), grace.clone()]);

    let renamed = store.update_by_id(ada.id, "Lovelace").await.unwrap();
    assert_eq!(renamed.id, ada.id);
    assert_eq!(renamed.name, "Lovelace");

    let missing = store.update_by_id(grace.id + 1000, "Nobody").await.unwrap_err();
    assert!(missing.is_not_found());

    assert_eq!(store.delete_all().await.unwrap(), 2);
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn connect_rejects_malformed_url() {
    let config = DatabaseConfig {
        url: "not a postgres url".to_string(),
        max_connections: 1,
        acquire_timeout_secs: 1,
    };

    let err = postgres::connect(&config).await.unwrap_err();
    assert!(err.to_string().contains("V78BO4"));
}
