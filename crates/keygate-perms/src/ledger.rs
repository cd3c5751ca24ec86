//! Permission ledger and access checks.
//!
//! Permission sets live in the state store under each identity's canonical
//! string. The ledger reads and overwrites them; it never merges.

use keygate_core::{Identity, PermissionLabel, PermissionSet};
use keygate_store::StateStore;

use crate::error::{PermsError, Result};

/// View of the state store as a map from identity to permission set.
#[derive(Debug, Clone)]
pub struct PermissionLedger<S> {
    store: S,
}

impl<S: StateStore> PermissionLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the permission set for `identity`.
    ///
    /// `Ok(None)` when the identity has never been granted anything.
    pub fn permissions_of(&self, identity: &Identity) -> Result<Option<PermissionSet>> {
        match self.store.get(identity.as_str())? {
            Some(bytes) => Ok(Some(PermissionSet::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Check whether `identity` holds `label`.
    ///
    /// Fails closed: a missing entry, a store error, or an undecodable value
    /// all answer `false`.
    pub fn has_permission(&self, identity: &Identity, label: PermissionLabel) -> bool {
        match self.permissions_of(identity) {
            Ok(Some(set)) => set.contains(label),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(
                    identity = %identity.fingerprint(),
                    %label,
                    error = %e,
                    "permission lookup failed, denying"
                );
                false
            }
        }
    }

    /// Like [`has_permission`](Self::has_permission) but returns `Forbidden`.
    pub fn require(&self, identity: &Identity, label: PermissionLabel) -> Result<()> {
        if self.has_permission(identity, label) {
            tracing::debug!(identity = %identity.fingerprint(), %label, "permission granted");
            Ok(())
        } else {
            tracing::debug!(identity = %identity.fingerprint(), %label, "permission denied");
            Err(PermsError::Forbidden {
                fingerprint: identity.fingerprint(),
                label,
            })
        }
    }

    /// Replace the permission set of `identity`.
    pub fn assign(&self, identity: &Identity, set: &PermissionSet) -> Result<()> {
        let encoded = set.encode()?;
        self.store.put(identity.as_str(), &encoded)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use keygate_store::{MemoryStore, Result as StoreResult, StoreError};
    use proptest::prelude::*;

    fn identity(name: &str) -> Identity {
        Identity::resolve(name.as_bytes()).unwrap()
    }

    /// Store whose reads always fail.
    struct BrokenStore;

    impl StateStore for BrokenStore {
        fn get(&self, _key: &str) -> StoreResult<Option<Bytes>> {
            Err(StoreError::Backend("unreachable".into()))
        }

        fn put(&self, _key: &str, _value: &[u8]) -> StoreResult<()> {
            Err(StoreError::Backend("unreachable".into()))
        }

        fn delete(&self, _key: &str) -> StoreResult<()> {
            Err(StoreError::Backend("unreachable".into()))
        }
    }

    #[test]
    fn test_unknown_identity_has_nothing() {
        let ledger = PermissionLedger::new(MemoryStore::new());
        let nobody = identity("nobody");

        for label in PermissionLabel::ALL {
            assert!(!ledger.has_permission(&nobody, label));
        }
        assert!(ledger.permissions_of(&nobody).unwrap().is_none());
    }

    #[test]
    fn test_assign_and_check() {
        let ledger = PermissionLedger::new(MemoryStore::new());
        let alice = identity("alice");

        ledger.assign(&alice, &PermissionSet::read_only()).unwrap();

        assert!(ledger.has_permission(&alice, PermissionLabel::Read));
        assert!(!ledger.has_permission(&alice, PermissionLabel::Write));
        assert!(ledger.require(&alice, PermissionLabel::Read).is_ok());
        assert!(matches!(
            ledger.require(&alice, PermissionLabel::Write),
            Err(PermsError::Forbidden { label: PermissionLabel::Write, .. })
        ));
    }

    #[test]
    fn test_assign_replaces() {
        let ledger = PermissionLedger::new(MemoryStore::new());
        let alice = identity("alice");

        ledger.assign(&alice, &PermissionSet::full()).unwrap();
        ledger.assign(&alice, &PermissionSet::read_only()).unwrap();

        assert!(!ledger.has_permission(&alice, PermissionLabel::Admin));
        assert_eq!(
            ledger.permissions_of(&alice).unwrap(),
            Some(PermissionSet::read_only())
        );
    }

    #[test]
    fn test_store_failure_fails_closed() {
        let ledger = PermissionLedger::new(BrokenStore);
        let alice = identity("alice");

        assert!(!ledger.has_permission(&alice, PermissionLabel::Read));
        assert!(matches!(
            ledger.require(&alice, PermissionLabel::Read),
            Err(PermsError::Forbidden { .. })
        ));
    }

    #[test]
    fn test_corrupt_entry_fails_closed() {
        let alice = identity("alice");
        let store = MemoryStore::with_entries([(alice.as_str().to_string(), &b"\xff\x00"[..])]);
        let ledger = PermissionLedger::new(store);

        assert!(!ledger.has_permission(&alice, PermissionLabel::Read));
        assert!(ledger.permissions_of(&alice).is_err());
    }

    #[test]
    fn test_legacy_entry_is_honored_exactly() {
        let alice = identity("alice");
        let bob = identity("bob");
        let store = MemoryStore::with_entries([
            (alice.as_str().to_string(), &b"['read','write']"[..]),
            (bob.as_str().to_string(), &b"['readonly']"[..]),
        ]);
        let ledger = PermissionLedger::new(store);

        assert!(ledger.has_permission(&alice, PermissionLabel::Write));
        assert!(!ledger.has_permission(&alice, PermissionLabel::Admin));
        // Substring matching would have said yes here.
        assert!(!ledger.has_permission(&bob, PermissionLabel::Read));
    }

    proptest! {
        #[test]
        fn test_check_matches_assigned_set(
            name in "[a-z]{1,8}",
            labels in prop::collection::vec(0usize..3, 0..4),
        ) {
            let ledger = PermissionLedger::new(MemoryStore::new());
            let who = identity(&name);
            let set = PermissionSet::from_labels(labels.into_iter().map(|i| PermissionLabel::ALL[i]));

            ledger.assign(&who, &set).unwrap();
            for label in PermissionLabel::ALL {
                prop_assert_eq!(ledger.has_permission(&who, label), set.contains(label));
            }
        }
    }
}
