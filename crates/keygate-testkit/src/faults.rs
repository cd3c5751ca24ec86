//! Fault injection for the state store.
//!
//! [`FaultyStore`] wraps any store and fails chosen calls, so tests can
//! reach the error paths a real ledger only hits under load or outage.

use std::sync::Mutex;

use bytes::Bytes;
use keygate_store::{Result, StateStore, StoreError};

/// Which store call a fault applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Get,
    Put,
    Delete,
}

/// A rule: fail `op` on `key` (or on any key when `None`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub op: StoreOp,
    pub key: Option<String>,
}

impl Fault {
    fn matches(&self, op: StoreOp, key: &str) -> bool {
        self.op == op && self.key.as_deref().map_or(true, |k| k == key)
    }
}

/// Store wrapper that fails calls matching its active faults.
#[derive(Debug)]
pub struct FaultyStore<S> {
    inner: S,
    faults: Mutex<Vec<Fault>>,
}

impl<S: StateStore> FaultyStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            faults: Mutex::new(Vec::new()),
        }
    }

    /// The wrapped store, for inspecting state behind the faults.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Fail every `op` on `key`.
    pub fn fail_on(&self, op: StoreOp, key: &str) {
        self.push(Fault {
            op,
            key: Some(key.to_string()),
        });
    }

    /// Fail every `op` regardless of key.
    pub fn fail_all(&self, op: StoreOp) {
        self.push(Fault { op, key: None });
    }

    /// Remove every fault.
    pub fn heal(&self) {
        if let Ok(mut faults) = self.faults.lock() {
            faults.clear();
        }
    }

    fn push(&self, fault: Fault) {
        if let Ok(mut faults) = self.faults.lock() {
            faults.push(fault);
        }
    }

    fn check(&self, op: StoreOp, key: &str) -> Result<()> {
        let faults = self
            .faults
            .lock()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        if faults.iter().any(|f| f.matches(op, key)) {
            return Err(StoreError::Backend(format!("injected {op:?} failure on {key}")));
        }
        Ok(())
    }
}

impl<S: StateStore> StateStore for FaultyStore<S> {
    fn get(&self, key: &str) -> Result<Option<Bytes>> {
        self.check(StoreOp::Get, key)?;
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.check(StoreOp::Put, key)?;
        self.inner.put(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.check(StoreOp::Delete, key)?;
        self.inner.delete(key)
    }
}
