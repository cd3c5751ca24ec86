//! Proptest generators for property-based testing.

use proptest::prelude::*;

use keygate_core::{is_reserved_key, Credential, PermissionLabel, PermissionSet};

/// Generate arbitrary non-empty credential bytes.
pub fn credential() -> impl Strategy<Value = Credential> {
    prop::collection::vec(any::<u8>(), 1..=64).prop_map(Credential::new)
}

/// Generate a certificate-like subject string credential.
pub fn subject_credential() -> impl Strategy<Value = Credential> {
    ("[a-z]{1,12}", "Org[0-9]")
        .prop_map(|(cn, org)| Credential::from(format!("CN={cn},O={org}").into_bytes()))
}

/// Generate two different credentials.
pub fn distinct_credentials() -> impl Strategy<Value = (Credential, Credential)> {
    (credential(), credential()).prop_filter("credentials must differ", |(a, b)| a != b)
}

/// Generate a private entry key that is not a workflow slot and not an
/// identity key.
pub fn private_key() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.:-]{1,32}".prop_filter("key must not be reserved", |k| !is_reserved_key(k))
}

/// Generate an entry value of up to `max_len` characters.
pub fn value(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..=max_len).prop_map(|cs| cs.into_iter().collect())
}

/// Generate a permission label.
pub fn label() -> impl Strategy<Value = PermissionLabel> {
    prop_oneof![
        Just(PermissionLabel::Read),
        Just(PermissionLabel::Write),
        Just(PermissionLabel::Admin),
    ]
}

/// Generate any permission set.
pub fn permission_set() -> impl Strategy<Value = PermissionSet> {
    prop::collection::vec(label(), 0..=3).prop_map(PermissionSet::from_labels)
}

/// One step of a random session against the dispatch surface.
#[derive(Debug, Clone)]
pub enum Action {
    /// Caller index, key, value.
    Put(usize, String, String),
    /// Caller index, key.
    Get(usize, String),
    /// Caller index.
    Request(usize),
    /// Caller index, read-write when true.
    Grant(usize, bool),
}

/// Generate an action among `parties` callers.
pub fn action(parties: usize) -> impl Strategy<Value = Action> {
    let who = 0..parties.max(1);
    prop_oneof![
        (who.clone(), private_key(), value(16)).prop_map(|(w, k, v)| Action::Put(w, k, v)),
        (who.clone(), private_key()).prop_map(|(w, k)| Action::Get(w, k)),
        who.clone().prop_map(Action::Request),
        (who, any::<bool>()).prop_map(|(w, rw)| Action::Grant(w, rw)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use keygate_core::IDENTITY_PREFIX;

    proptest! {
        #[test]
        fn test_private_keys_never_collide(key in private_key()) {
            prop_assert!(!is_reserved_key(&key));
            prop_assert!(!key.starts_with(IDENTITY_PREFIX));
        }

        #[test]
        fn test_credentials_resolve(c in credential()) {
            prop_assert!(c.identity().is_ok());
        }

        #[test]
        fn test_subjects_resolve(c in subject_credential()) {
            prop_assert!(c.identity().is_ok());
        }
    }
}
