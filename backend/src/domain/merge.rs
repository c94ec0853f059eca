//! Merge operation: append new users to an existing encoded collection.

use std::sync::Arc;

use crate::domain::collection::{CodecError, decode_collection, encode_collection};
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::user::NewUser;

/// Failures raised by [`MergeService::merge`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// The existing document failed to decode, or the result to encode.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// The durable store rejected the new entries.
    ///
    /// Entries persisted before the failure are not rolled back; the
    /// request fails as a whole without undoing prior side effects.
    #[error(transparent)]
    Persistence(#[from] UserPersistenceError),
}

/// Combines a previously encoded collection with newly supplied users.
///
/// New entries are persisted (with their identifiers) before the merged
/// document is produced; the encoded output never carries identifiers.
#[derive(Clone)]
pub struct MergeService {
    repository: Arc<dyn UserRepository>,
}

impl MergeService {
    /// Build the service around a repository constructed at process start.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Decode `existing_document`, persist `new_users`, and return the
    /// re-encoded concatenation with the new entries appended in input
    /// order.
    pub async fn merge(
        &self,
        existing_document: &str,
        new_users: &[NewUser],
    ) -> Result<String, MergeError> {
        let mut records = decode_collection(existing_document)?;

        // The batch goes to the store unconditionally, empty or not.
        self.repository.insert_batch(new_users).await?;

        records.extend(new_users.iter().map(NewUser::record));
        encode_collection(&records).map_err(MergeError::from)
    }
}

#[cfg(test)]
mod tests;
