//! # Keygate
//!
//! A permission-gated key-value store with a request/grant workflow for
//! delegating read and write access.
//!
//! ## Overview
//!
//! - **Initialization** seeds the deployer with `read`, `write` and `admin`.
//! - **Private entries** are read with `read` and written with `write`.
//! - **Requests**: any caller may ask for access; one request waits at a time.
//! - **Grants**: an `admin` resolves the waiting request with `{read}` or
//!   `{read, write}`, notifying observers through an event sink.
//!
//! Caller identities come from credential bytes handed over by the host; no
//! cryptographic verification happens here.
//!
//! ## Usage
//!
//! ```rust
//! use keygate::{Contract, ContractConfig, Response};
//! use keygate::core::{Credential, PermissionLabel};
//! use keygate::perms::MemoryEventSink;
//! use keygate::store::MemoryStore;
//!
//! let contract = Contract::new(MemoryStore::new(), MemoryEventSink::new(), ContractConfig::default());
//!
//! let deployer = Credential::from("deployer-cert");
//! let alice = Credential::from("alice-cert");
//!
//! assert!(contract.instantiate(&deployer).is_success());
//! assert!(contract.invoke(&alice, "permissionRequest", &[] as &[&str]).is_success());
//! assert!(contract.invoke(&deployer, "addReadWritePermission", &[] as &[&str]).is_success());
//!
//! contract.invoke(&alice, "putPrivate", &["k", "v"]);
//! let got = contract.invoke(&alice, "getPrivate", &["k"]);
//! assert_eq!(got.payload(), Some(&b"v"[..]));
//! ```
//!
//! ## Re-exports
//!
//! - `keygate::core` - Identities and permission sets
//! - `keygate::store` - State store abstraction, in-memory and SQLite stores
//! - `keygate::perms` - Ledger, workflow and event sinks

pub mod config;
pub mod contract;
pub mod error;
pub mod response;

// Re-export component crates
pub use keygate_core as core;
pub use keygate_perms as perms;
pub use keygate_store as store;

// Re-export main types for convenience
pub use config::{ContractConfig, UNSUPPORTED_OPERATION};
pub use contract::{Contract, Operation};
pub use error::{ContractError, Result};
pub use response::Response;

pub use keygate_core::{
    Credential, CredentialSource, ErrorKind, Identity, PermissionLabel, PermissionSet,
};
pub use keygate_perms::{EventSink, GrantKind, GrantOutcome};
pub use keygate_store::StateStore;
