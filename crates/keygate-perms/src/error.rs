//! Error types for the permissions module.

use keygate_core::{CoreError, ErrorKind, PermissionLabel};
use keygate_store::StoreError;
use thiserror::Error;

use crate::event::EventError;
use crate::grant::GrantStep;

/// Errors that can occur during permission operations.
#[derive(Debug, Error)]
pub enum PermsError {
    /// Caller lacks the required label.
    #[error("forbidden: caller {fingerprint} lacks '{label}' permission")]
    Forbidden {
        fingerprint: String,
        label: PermissionLabel,
    },

    /// The pending-request slot is occupied.
    #[error("permission request already pending")]
    RequestAlreadyPending,

    /// A grant found the pending-request slot empty.
    #[error("no pending permission request")]
    NoPendingRequest,

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Identity or permission-set error.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Event sink error.
    #[error("event error: {0}")]
    Event(#[from] EventError),

    /// The requester's permissions were written but a later grant step failed.
    ///
    /// The new permission set is in effect. The pending request may still be
    /// in its slot, depending on `step`.
    #[error("grant to {requester} partially applied: {step} failed: {source}")]
    PartialGrant {
        requester: String,
        step: GrantStep,
        #[source]
        source: Box<PermsError>,
    },
}

impl PermsError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PermsError::Forbidden { .. } => ErrorKind::Forbidden,
            PermsError::RequestAlreadyPending => ErrorKind::RequestAlreadyPending,
            PermsError::NoPendingRequest => ErrorKind::NoPendingRequest,
            PermsError::Store(_) => ErrorKind::Storage,
            PermsError::Core(e) => e.kind(),
            PermsError::Event(_) => ErrorKind::EventEmission,
            PermsError::PartialGrant { source, .. } => source.kind(),
        }
    }

    /// Whether side effects were applied despite the failure.
    pub fn is_partial(&self) -> bool {
        matches!(self, PermsError::PartialGrant { .. })
    }
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
