//! Authorization seam.
//!
//! Every engine operation asks an [`AccessPolicy`] for permission before it
//! validates or scans anything. The engine itself knows no roles or
//! identities; the policy is supplied by the host.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

/// Kind of access an engine call needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Read,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Read => "Read",
            Operation::Update => "Update",
            Operation::Delete => "Delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides whether an operation on an entity is permitted.
pub trait AccessPolicy: Send + Sync {
    /// Returns `Ok(())` to allow, or an error (usually
    /// [`QueryError::Unauthorized`]) to refuse.
    fn check(&self, entity: &'static str, operation: Operation) -> Result<()>;
}

/// Policy permitting everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn check(&self, _entity: &'static str, _operation: Operation) -> Result<()> {
        Ok(())
    }
}

/// Closures returning `true` to allow act as policies.
impl<F> AccessPolicy for F
where
    F: Fn(&'static str, Operation) -> bool + Send + Sync,
{
    fn check(&self, entity: &'static str, operation: Operation) -> Result<()> {
        if self(entity, operation) {
            Ok(())
        } else {
            Err(QueryError::Unauthorized { entity, operation })
        }
    }
}
