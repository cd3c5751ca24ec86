//! # Keygate Permissions
//!
//! Access control over the state store and the workflow that hands out
//! access.
//!
//! ## Overview
//!
//! Permissions are plain state store entries: each identity maps to an
//! encoded [`PermissionSet`](keygate_core::PermissionSet). There is no
//! history and no revocation; every grant overwrites.
//!
//! ## Key Concepts
//!
//! - **Ledger**: [`PermissionLedger`] reads, checks and replaces permission sets.
//!   Checks fail closed.
//! - **Pending request**: one slot holding the raw credential of whoever asked
//!   for access. Only one request can wait at a time.
//! - **Grant**: an `admin` resolves the pending request with [`GrantKind::Read`]
//!   or [`GrantKind::ReadWrite`] through [`GrantWorkflow`].
//! - **Events**: every grant notifies an injected [`EventSink`], keyed by the
//!   requester's identity.
//!
//! ## Usage
//!
//! ```rust
//! use keygate_core::{Credential, Identity, PermissionLabel, PermissionSet};
//! use keygate_perms::{GrantKind, GrantWorkflow, MemoryEventSink};
//! use keygate_store::MemoryStore;
//!
//! let workflow = GrantWorkflow::new(MemoryStore::new(), MemoryEventSink::new());
//! let admin = Identity::resolve(b"deployer").unwrap();
//! workflow.ledger().assign(&admin, &PermissionSet::full()).unwrap();
//!
//! let alice = Credential::from("alice");
//! workflow.submit_request(&alice).unwrap();
//! workflow.grant(&admin, GrantKind::ReadWrite).unwrap();
//!
//! let alice_id = alice.identity().unwrap();
//! assert!(workflow.ledger().has_permission(&alice_id, PermissionLabel::Write));
//! ```

pub mod error;
pub mod event;
pub mod grant;
pub mod ledger;
pub mod workflow;

pub use error::{PermsError, Result};
pub use event::{EmittedEvent, EventError, EventSink, GrantEvent, LogEventSink, MemoryEventSink};
pub use grant::{GrantKind, GrantOutcome, GrantStep};
pub use ledger::PermissionLedger;
pub use workflow::GrantWorkflow;
