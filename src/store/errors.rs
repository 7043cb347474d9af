//! # Store Errors
//!
//! Error types for the record access layer. Every variant carries the
//! diagnostic tag of the call site that produced it.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record access errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection string could not be parsed
    #[error("Error: V78BO4 - Parsing the database configs from the url.")]
    InvalidUrl(#[source] sqlx::Error),

    /// Pool could not be created
    #[error("Error: GKK2EB - Creating the database pool.")]
    Connect(#[source] sqlx::Error),

    /// Pool was created but a test query failed
    #[error("Error: HT9IXG - Testing the database pool.")]
    Ping(#[source] sqlx::Error),

    /// Applying or reverting migrations failed
    #[error("Error: 99ECW0 - Running {direction} migration.")]
    Migrate {
        direction: &'static str,
        #[source]
        source: sqlx::migrate::MigrateError,
    },

    /// Select query or connection failed
    #[error("Error: 30UUBR - Querying foos from db.")]
    Query(#[source] sqlx::Error),

    /// A row came back but could not be mapped to a record
    #[error("Error: YN80XB - Scanning row of foos from db.")]
    Decode(#[source] sqlx::Error),

    /// Insert failed
    #[error("Error: WOPUDO - Inserting foo into database.")]
    Insert(#[source] sqlx::Error),

    /// Bulk delete failed
    #[error("Error: 1BLNNL - Deleting foos from database.")]
    Delete(#[source] sqlx::Error),

    /// No record has the requested identity
    #[error("Error: BATWXG - No foo found with given ID: {id}")]
    NotFound { id: i64 },

    /// Update failed for a reason other than a missing record
    #[error("Error: 2H6YX9 - Updating foo in database.")]
    Update(#[source] sqlx::Error),

    /// Backend in an unusable state (e.g. a poisoned in-memory lock)
    #[error("Error: 7MQ2LS - Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether this error means the requested record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Classify a select failure: decode problems are reported separately
    /// from query/connection problems.
    pub(crate) fn from_select(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::Decode(_) => StoreError::Decode(err),
            other => StoreError::Query(other),
        }
    }
}
