//! StateStore trait: the minimal interface for persisted state.

use std::sync::Arc;

use bytes::Bytes;

use crate::error::Result;

/// The state store: a flat mapping from string key to bytes.
///
/// Implementations can be in-memory, SQLite, or a ledger owned by the host.
/// Keygate doesn't care, it just needs these three calls.
///
/// # Serialization requirement
///
/// Each call must be atomic on its own. Keygate performs read-then-write
/// sequences (the pending-request slot in particular) and is only correct if
/// the host commits at most one transaction at a time touching a given key.
/// Neither bundled implementation provides multi-call transactions.
pub trait StateStore: Send + Sync {
    /// Get the value at `key`. Missing keys are `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<Bytes>>;

    /// Overwrite the value at `key`.
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Remove `key`. Removing a missing key succeeds.
    fn delete(&self, key: &str) -> Result<()>;
}

impl<S: StateStore + ?Sized> StateStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Bytes>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

impl<S: StateStore + ?Sized> StateStore for &S {
    fn get(&self, key: &str) -> Result<Option<Bytes>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}
