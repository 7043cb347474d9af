//! # Service Errors

use std::fmt;

use crate::store::StoreError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// A store failure annotated with the service call site that observed it
#[derive(Debug)]
pub struct ServiceError {
    tag: &'static str,
    context: &'static str,
    source: StoreError,
}

impl ServiceError {
    pub(crate) fn wrap(tag: &'static str, context: &'static str, source: StoreError) -> Self {
        Self {
            tag,
            context,
            source,
        }
    }

    /// Diagnostic tag of the service call site
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// The wrapped store error
    pub fn store_error(&self) -> &StoreError {
        &self.source
    }

    /// Whether the underlying store reported a missing record
    pub fn is_not_found(&self) -> bool {
        self.source.is_not_found()
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {} - {}", self.tag, self.context)
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
