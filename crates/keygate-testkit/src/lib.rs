//! # Keygate Testkit
//!
//! Testing utilities for Keygate.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Pinned identity keys and stored permission sets
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A contract with an initialized deployer
//! - **Faults**: A store wrapper that fails chosen calls
//!
//! ## Golden Vectors
//!
//! ```rust
//! use keygate_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, actual) in verify_all_vectors() {
//!     assert!(matches, "{name}: {actual}");
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use keygate_testkit::fixtures::{user, TestFixture};
//! use keygate_core::PermissionLabel;
//!
//! let fixture = TestFixture::new();
//! let alice = user(0);
//! fixture.onboard_writer(&alice);
//! assert!(fixture.has(&alice, PermissionLabel::Write));
//! ```
//!
//! ## Fault Injection
//!
//! ```rust
//! use keygate_testkit::faults::{FaultyStore, StoreOp};
//! use keygate_store::{MemoryStore, StateStore};
//!
//! let store = FaultyStore::new(MemoryStore::new());
//! store.fail_on(StoreOp::Delete, "permissionRequest");
//! assert!(store.delete("permissionRequest").is_err());
//! ```

pub mod faults;
pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use faults::{Fault, FaultyStore, StoreOp};
pub use fixtures::{random_credential, user, users, TestFixture};
pub use generators::Action;
pub use vectors::{identity_vectors, permission_vectors, verify_all_vectors};
