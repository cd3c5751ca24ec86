//! Caller identities.
//!
//! An [`Identity`] is derived one-way from the credential bytes the host
//! hands over for a call. The canonical form is:
//!
//! ```text
//! identity/<percent-escaped credential>
//! ```
//!
//! Every byte outside `A-Z a-z 0-9 - _ . ~` is written as `%XX` (uppercase
//! hex), including `%` itself, so the mapping is injective. No escaped form
//! contains `/`, and no reserved key starts with `identity/`, so an identity
//! can never collide with a workflow slot.

use std::fmt;

use crate::error::{CoreError, Result};

/// Prefix that namespaces every identity in the state store.
pub const IDENTITY_PREFIX: &str = "identity/";

/// Raw credential bytes of a caller.
///
/// Stored verbatim in the pending-request and last-granted slots; never used
/// as a lookup key directly.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential(Vec<u8>);

impl Credential {
    /// Wrap raw credential bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume into the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Canonicalize into an identity.
    pub fn identity(&self) -> Result<Identity> {
        Identity::resolve(&self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Credentials may be whole certificates; show size only.
        write!(f, "Credential({} bytes)", self.0.len())
    }
}

impl From<&[u8]> for Credential {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Credential {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&str> for Credential {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

/// Supplies the credential of the current caller.
///
/// Implemented by the hosting environment. Called once per operation.
pub trait CredentialSource {
    /// Fetch the caller's raw credential.
    fn caller_credential(&self) -> Result<Credential>;
}

impl CredentialSource for Credential {
    fn caller_credential(&self) -> Result<Credential> {
        Ok(self.clone())
    }
}

impl<T: CredentialSource + ?Sized> CredentialSource for &T {
    fn caller_credential(&self) -> Result<Credential> {
        (**self).caller_credential()
    }
}

/// Canonical caller identity.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(String);

impl Identity {
    /// Canonicalize raw credential bytes.
    ///
    /// Fails with [`CoreError::EmptyCredential`] on empty input.
    pub fn resolve(credential: &[u8]) -> Result<Self> {
        if credential.is_empty() {
            return Err(CoreError::EmptyCredential);
        }
        let escaped = urlencoding::encode_binary(credential);
        Ok(Self(format!("{IDENTITY_PREFIX}{escaped}")))
    }

    /// Resolve the identity of whoever `source` says is calling.
    pub fn of_caller<C: CredentialSource + ?Sized>(source: &C) -> Result<(Self, Credential)> {
        let credential = source.caller_credential()?;
        let identity = Self::resolve(credential.as_bytes())?;
        Ok((identity, credential))
    }

    /// The canonical string, usable as a state store key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover the credential bytes this identity was derived from.
    pub fn credential(&self) -> Result<Credential> {
        let escaped = self
            .0
            .strip_prefix(IDENTITY_PREFIX)
            .ok_or_else(|| CoreError::DecodingError(format!("missing prefix in {}", self.0)))?;
        let bytes = urlencoding::decode_binary(escaped.as_bytes());
        Ok(Credential(bytes.into_owned()))
    }

    /// Short BLAKE3 fingerprint for log fields.
    pub fn fingerprint(&self) -> String {
        let hash = blake3::hash(self.0.as_bytes());
        hex::encode(&hash.as_bytes()[..8])
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self.fingerprint())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
