//! # Service Errors
//!
//! The error taxonomy callers see, plus the mapping to HTTP status codes and the JSON error body
//! a resource layer would return.

use chrono::{DateTime, Utc};
use resource_store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by every service operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// No entity is stored under the requested id.
    #[error("Resource not found. Id {id}")]
    ResourceNotFound { entity: &'static str, id: String },

    /// A delete (or write) would break a reference held by another entity.
    #[error("{0}")]
    DatabaseIntegrityViolation(String),

    /// The caller's input was rejected before touching any store.
    #[error("{0}")]
    PreconditionFailure(String),

    /// The store could not be reached.
    #[error(transparent)]
    Store(StoreError),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::ResourceNotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn precondition(reason: impl Into<String>) -> Self {
        Self::PreconditionFailure(reason.into())
    }

    /// HTTP status a resource layer answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::ResourceNotFound { .. } => 404,
            ServiceError::DatabaseIntegrityViolation(_) => 400,
            ServiceError::PreconditionFailure(_) => 400,
            ServiceError::Store(_) => 503,
        }
    }

    /// Short title used in the `error` field of [`ErrorBody`].
    pub fn title(&self) -> &'static str {
        match self {
            ServiceError::ResourceNotFound { .. } => "Resource not found",
            ServiceError::DatabaseIntegrityViolation(_) => "Database error",
            ServiceError::PreconditionFailure(_) => "Invalid request",
            ServiceError::Store(_) => "Store unavailable",
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { entity, id } => ServiceError::ResourceNotFound { entity, id },
            StoreError::IntegrityViolation(reason) => ServiceError::DatabaseIntegrityViolation(reason),
            StoreError::MissingKey(entity) => {
                ServiceError::PreconditionFailure(format!("{entity} has no key"))
            }
            closed @ (StoreError::ActorClosed | StoreError::ActorDropped) => {
                ServiceError::Store(closed)
            }
        }
    }
}

/// Error payload returned to HTTP callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

impl ErrorBody {
    /// Builds the body for `error` raised while serving `path`, stamped with the current time.
    pub fn new(error: &ServiceError, path: impl Into<String>) -> Self {
        Self::at(Utc::now(), error, path)
    }

    pub fn at(timestamp: DateTime<Utc>, error: &ServiceError, path: impl Into<String>) -> Self {
        Self {
            timestamp,
            status: error.status_code(),
            error: error.title().to_string(),
            message: error.to_string(),
            path: path.into(),
        }
    }
}
