//! # Keygate Core
//!
//! Pure primitives for Keygate: identities, permission sets, and the keys
//! reserved by the request/grant workflow.
//!
//! This crate contains no I/O and no storage. It only defines how callers are
//! named and how their rights are encoded.
//!
//! ## Key Types
//!
//! - [`Identity`] - Canonical lookup key derived from a caller credential
//! - [`Credential`] - Raw credential bytes as handed over by the host
//! - [`CredentialSource`] - Where a call's credential comes from
//! - [`PermissionLabel`] / [`PermissionSet`] - The `read`/`write`/`admin` model
//! - [`ErrorKind`] - Flat failure classification shared by all crates
//!
//! ## Canonicalization
//!
//! Identities are `identity/` followed by the percent-escaped credential. See
//! the [`identity`] module.

pub mod error;
pub mod identity;
pub mod keys;
pub mod permission;

pub use error::{CoreError, ErrorKind, Result};
pub use identity::{Credential, CredentialSource, Identity, IDENTITY_PREFIX};
pub use keys::{is_reserved_key, LAST_GRANTED_USER_KEY, PENDING_REQUEST_KEY, RESERVED_KEYS};
pub use permission::{PermissionLabel, PermissionSet};
