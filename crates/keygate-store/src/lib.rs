//! # Keygate Store
//!
//! State store abstraction for Keygate. Every byte Keygate persists goes
//! through the [`StateStore`] trait: permission sets, the pending-request and
//! last-granted slots, and private entries all share one flat key space.
//!
//! ## Key Types
//!
//! - [`StateStore`] - get/put/delete by exact key
//! - [`MemoryStore`] - In-memory store for tests and embedding
//! - [`SqliteStore`] - SQLite-based durable store
//!
//! ## Usage
//!
//! ```rust,no_run
//! use keygate_store::{SqliteStore, StateStore};
//!
//! fn example() {
//!     let store = SqliteStore::open("keygate.db").unwrap();
//!
//!     store.put("greeting", b"hello").unwrap();
//!     let value = store.get("greeting").unwrap();
//!     assert_eq!(value.as_deref(), Some(&b"hello"[..]));
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Per-call atomicity only**: no multi-call transactions. Check-then-write
//!   sequences rely on the host committing one transaction at a time per key.
//! - **Absent is not an error**: `get` on a missing key returns `Ok(None)`.
//! - **Delete is idempotent**: deleting a missing key succeeds.

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::StateStore;
