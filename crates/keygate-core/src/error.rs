//! Error types for Keygate Core.

use std::fmt;

use thiserror::Error;

/// Core errors that can occur while resolving identities or handling
/// permission sets.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to get caller credential: {0}")]
    CredentialUnavailable(String),

    #[error("caller credential is empty")]
    EmptyCredential,

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),

    #[error("unknown permission label: {0}")]
    UnknownLabel(String),
}

impl CoreError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::CredentialUnavailable(_) | CoreError::EmptyCredential => {
                ErrorKind::IdentityResolution
            }
            CoreError::EncodingError(_)
            | CoreError::DecodingError(_)
            | CoreError::UnknownLabel(_) => ErrorKind::Storage,
        }
    }
}

/// Flat classification of every failure an operation can report.
///
/// Each crate's error type maps onto one of these through a `kind()` method,
/// so hosts can branch on the failure without matching nested enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller lacks the label the operation requires.
    Forbidden,
    /// Arguments were missing or malformed.
    InvalidArgument,
    /// A permission request is already waiting for a grant.
    RequestAlreadyPending,
    /// A grant was attempted with no pending request.
    NoPendingRequest,
    /// The state store failed, or held bytes that could not be interpreted.
    Storage,
    /// The caller credential could not be retrieved or canonicalized.
    IdentityResolution,
    /// The event sink rejected a grant notification.
    EventEmission,
}

impl ErrorKind {
    /// Stable name used in response envelopes.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::RequestAlreadyPending => "RequestAlreadyPending",
            ErrorKind::NoPendingRequest => "NoPendingRequest",
            ErrorKind::Storage => "StorageError",
            ErrorKind::IdentityResolution => "IdentityResolutionError",
            ErrorKind::EventEmission => "EventEmissionError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_errors_are_identity_resolution() {
        assert_eq!(
            CoreError::EmptyCredential.kind(),
            ErrorKind::IdentityResolution
        );
        assert_eq!(
            CoreError::CredentialUnavailable("no creator".into()).kind(),
            ErrorKind::IdentityResolution
        );
    }

    #[test]
    fn test_decode_errors_are_storage() {
        assert_eq!(
            CoreError::DecodingError("truncated".into()).kind(),
            ErrorKind::Storage
        );
        assert_eq!(CoreError::UnknownLabel("root".into()).kind(), ErrorKind::Storage);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::Storage.to_string(), "StorageError");
        assert_eq!(ErrorKind::Forbidden.to_string(), "Forbidden");
    }
}
