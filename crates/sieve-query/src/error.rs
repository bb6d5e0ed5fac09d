//! Error types for the query crate.

use thiserror::Error;

use crate::access::Operation;
use crate::op::Op;

/// Errors that can occur when validating or evaluating a query.
///
/// Every variant except [`QueryError::Storage`] and [`QueryError::Cancelled`]
/// is raised during validation, before a single record is read.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A filter or sort names a field the entity does not declare.
    #[error("unknown field '{field}' for entity '{entity}'")]
    UnknownField { entity: &'static str, field: String },

    /// A filter value does not fit the declared type of its field.
    #[error("invalid value for field '{field}' in '{op}' filter: {reason}")]
    InvalidValue { field: String, op: Op, reason: String },

    /// The filter tree is structurally invalid.
    #[error("malformed '{op}' filter: {reason}")]
    MalformedFilter { op: Op, reason: String },

    /// `skip` is negative or `take` is not positive.
    #[error("invalid page size: {0}")]
    InvalidPageSize(String),

    /// The access policy refused the operation.
    #[error("operation '{operation}' on '{entity}' is not permitted")]
    Unauthorized {
        entity: &'static str,
        operation: Operation,
    },

    /// Evaluation was cancelled through a [`CancelToken`](crate::CancelToken).
    #[error("query evaluation was cancelled")]
    Cancelled,

    /// The record source failed. The original error is kept as the source.
    #[error("record source failed: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl QueryError {
    pub(crate) fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        QueryError::Storage(Box::new(err))
    }

    /// Returns `true` for errors caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            QueryError::UnknownField { .. }
                | QueryError::InvalidValue { .. }
                | QueryError::MalformedFilter { .. }
                | QueryError::InvalidPageSize(_)
                | QueryError::Unauthorized { .. }
        )
    }

    /// Returns `true` if repeating the same request could succeed.
    ///
    /// Validation failures are deterministic and never retryable. Storage
    /// faults are left to the caller's judgement.
    pub fn is_retryable(&self) -> bool {
        matches!(self, QueryError::Storage(_) | QueryError::Cancelled)
    }
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Errors raised while loading a [`QueryConfig`](crate::QueryConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
