//! Error types for the contract.

use keygate_core::{CoreError, ErrorKind};
use keygate_perms::PermsError;
use keygate_store::StoreError;
use thiserror::Error;

/// Errors that can occur during contract operations.
#[derive(Debug, Error)]
pub enum ContractError {
    /// Missing or malformed arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Identity resolution or permission-set encoding error.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Permission or workflow error.
    #[error(transparent)]
    Perms(#[from] PermsError),

    /// The deployer's permissions did not read back as written.
    #[error("initialization check failed: {0}")]
    InitVerification(String),
}

impl ContractError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ContractError::Core(e) => e.kind(),
            ContractError::Store(_) => ErrorKind::Storage,
            ContractError::Perms(e) => e.kind(),
            ContractError::InitVerification(_) => ErrorKind::Storage,
        }
    }

    /// Whether side effects were applied despite the failure.
    pub fn is_partial(&self) -> bool {
        matches!(self, ContractError::Perms(e) if e.is_partial())
    }
}

/// Result type for contract operations.
pub type Result<T> = std::result::Result<T, ContractError>;
