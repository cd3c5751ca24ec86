//! Response envelope returned by the dispatch surface.

use bytes::Bytes;
use keygate_core::ErrorKind;

use crate::error::ContractError;

/// Outcome of a dispatched call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The call succeeded, with an optional payload.
    Success(Option<Bytes>),
    /// The call failed.
    Error {
        kind: ErrorKind,
        message: String,
    },
}

impl Response {
    /// Status code in the host's convention.
    pub const OK: u16 = 200;
    /// Status code in the host's convention.
    pub const ERROR: u16 = 500;

    /// Success without payload.
    pub fn ok() -> Self {
        Response::Success(None)
    }

    /// Success carrying `payload`.
    pub fn with_payload(payload: impl Into<Bytes>) -> Self {
        Response::Success(Some(payload.into()))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    pub fn status(&self) -> u16 {
        match self {
            Response::Success(_) => Self::OK,
            Response::Error { .. } => Self::ERROR,
        }
    }

    /// Payload of a successful call.
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Response::Success(payload) => payload.as_deref(),
            Response::Error { .. } => None,
        }
    }

    /// Kind of a failed call.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Response::Success(_) => None,
            Response::Error { kind, .. } => Some(*kind),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Response::Success(_) => None,
            Response::Error { message, .. } => Some(message),
        }
    }
}

impl From<ContractError> for Response {
    fn from(err: ContractError) -> Self {
        Response::Error {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<Result<Option<Bytes>, ContractError>> for Response {
    fn from(result: Result<Option<Bytes>, ContractError>) -> Self {
        match result {
            Ok(payload) => Response::Success(payload),
            Err(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        let r = Response::with_payload(&b"v"[..]);
        assert!(r.is_success());
        assert_eq!(r.status(), 200);
        assert_eq!(r.payload(), Some(&b"v"[..]));
        assert_eq!(r.error_kind(), None);
    }

    #[test]
    fn test_error_from_contract_error() {
        let r = Response::from(ContractError::InvalidArgument("missing key".into()));
        assert!(!r.is_success());
        assert_eq!(r.status(), 500);
        assert_eq!(r.error_kind(), Some(ErrorKind::InvalidArgument));
        assert_eq!(r.message(), Some("invalid argument: missing key"));
        assert_eq!(r.payload(), None);
    }
}
