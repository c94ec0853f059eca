//! Port abstraction for the durable user store.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::user::NewUser;

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// The insert failed during execution.
    #[error("user repository insert failed: {message}")]
    Query { message: String },
}

impl UserPersistenceError {
    /// Connection-level failure with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Query-level failure with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Write-only store for users supplied on the merge path.
///
/// The core never reads this store back to answer a request; records are
/// appended as a side effect of merging and that is the whole contract.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Durably store a batch of new users, identifiers included.
    async fn insert_batch(&self, batch: &[NewUser]) -> Result<(), UserPersistenceError>;
}

/// No-op repository for tests and wiring examples.
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert_batch(&self, _batch: &[NewUser]) -> Result<(), UserPersistenceError> {
        Ok(())
    }
}
