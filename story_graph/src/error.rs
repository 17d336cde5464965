//! Errors raised by [`NodeStore`](crate::NodeStore) operations.

use thiserror::Error;

use crate::nodes::NodeId;

/// Failures of store lookups and mutations.
///
/// A failed mutation never partially applies: the store is left exactly as
/// it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("node '{0}' not found")]
    NodeNotFound(NodeId),

    #[error("node id '{0}' already exists")]
    DuplicateId(NodeId),
}

impl StoreError {
    /// Whether this error is a lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NodeNotFound(_))
    }
}
