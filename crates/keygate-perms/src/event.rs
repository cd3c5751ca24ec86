//! Grant notifications.
//!
//! Grants notify outside observers through an injected [`EventSink`]. The
//! sink is a capability the host provides; Keygate keeps no queue of its own.
//!
//! The payload is a CBOR map:
//!
//! ```text
//! { "payload": "ReadWritePermission" }
//! ```

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grant::GrantKind;

/// Errors from emitting an event.
#[derive(Debug, Error)]
pub enum EventError {
    /// The sink refused the event.
    #[error("event rejected: {0}")]
    Rejected(String),

    /// The payload could not be encoded or decoded.
    #[error("event encoding error: {0}")]
    Encoding(String),
}

/// Receives events keyed by the affected identity.
pub trait EventSink: Send + Sync {
    /// Publish `payload` under `key`.
    fn emit(&self, key: &str, payload: &[u8]) -> Result<(), EventError>;
}

impl<E: EventSink + ?Sized> EventSink for Arc<E> {
    fn emit(&self, key: &str, payload: &[u8]) -> Result<(), EventError> {
        (**self).emit(key, payload)
    }
}

impl<E: EventSink + ?Sized> EventSink for &E {
    fn emit(&self, key: &str, payload: &[u8]) -> Result<(), EventError> {
        (**self).emit(key, payload)
    }
}

/// Payload of a grant event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantEvent {
    /// `"ReadPermission"` or `"ReadWritePermission"`.
    pub payload: String,
}

impl GrantEvent {
    /// Event for a grant of `kind`.
    pub fn new(kind: GrantKind) -> Self {
        Self {
            payload: kind.signal().to_string(),
        }
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EventError> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf).map_err(|e| EventError::Encoding(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EventError> {
        ciborium::from_reader(bytes).map_err(|e| EventError::Encoding(e.to_string()))
    }
}

/// An event as it reached a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedEvent {
    pub key: String,
    pub payload: Vec<u8>,
}

/// Sink that keeps every event in memory. For tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<EmittedEvent>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events emitted so far, oldest first.
    ///
    /// Events recorded before a panicking emitter poisoned the lock are still
    /// returned.
    pub fn events(&self) -> Vec<EmittedEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl EventSink for MemoryEventSink {
    fn emit(&self, key: &str, payload: &[u8]) -> Result<(), EventError> {
        let mut events = self
            .events
            .lock()
            .map_err(|e| EventError::Rejected(format!("sink lock poisoned: {e}")))?;
        events.push(EmittedEvent {
            key: key.to_string(),
            payload: payload.to_vec(),
        });
        Ok(())
    }
}

/// Sink that only logs. Used when the host has no observers.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&self, key: &str, payload: &[u8]) -> Result<(), EventError> {
        tracing::info!(key, payload_len = payload.len(), "event emitted");
        Ok(())
    }
}
