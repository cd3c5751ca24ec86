//! Property tests over random sessions.

use std::collections::HashMap;

use proptest::prelude::*;

use keygate_core::{Credential, ErrorKind, PermissionLabel, PermissionSet};
use keygate_testkit::generators::{action, credential, distinct_credentials, private_key, value};
use keygate_testkit::{users, Action, TestFixture};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_identity_is_injective((a, b) in distinct_credentials()) {
        prop_assert_ne!(a.identity().unwrap(), b.identity().unwrap());
    }

    #[test]
    fn test_outsider_never_reads_or_writes(
        outsider in credential(),
        key in private_key(),
        v in value(32),
    ) {
        let fixture = TestFixture::new();
        prop_assume!(outsider != fixture.deployer);

        fixture.contract.put_private(&fixture.deployer, &key, v.as_bytes()).unwrap();

        let err = fixture.contract.get_private(&outsider, &key).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Forbidden);
        let err = fixture.contract.put_private(&outsider, &key, b"x").unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Forbidden);

        let stored = fixture.contract.get_private(&fixture.deployer, &key).unwrap();
        prop_assert_eq!(stored.as_deref(), Some(v.as_bytes()));
    }

    /// Replays random sessions against a simple model of who holds what.
    #[test]
    fn test_session_matches_model(actions in prop::collection::vec(action(3), 1..40)) {
        let fixture = TestFixture::new();
        let parties: Vec<Credential> = users(2)
            .into_iter()
            .chain(std::iter::once(fixture.deployer.clone()))
            .collect();

        let mut perms: HashMap<usize, PermissionSet> = HashMap::new();
        perms.insert(2, PermissionSet::full());
        let mut pending: Option<usize> = None;
        let mut data: HashMap<String, String> = HashMap::new();
        let holds = |perms: &HashMap<usize, PermissionSet>, who: usize, label: PermissionLabel| {
            perms.get(&who).map_or(false, |s| s.contains(label))
        };

        for act in actions {
            match act {
                Action::Put(who, key, v) => {
                    let r = fixture.contract.invoke(&parties[who], "putPrivate", &[key.as_str(), v.as_str()]);
                    if holds(&perms, who, PermissionLabel::Write) {
                        prop_assert!(r.is_success());
                        data.insert(key, v);
                    } else {
                        prop_assert_eq!(r.error_kind(), Some(ErrorKind::Forbidden));
                    }
                }
                Action::Get(who, key) => {
                    let r = fixture.contract.invoke(&parties[who], "getPrivate", &[key.as_str()]);
                    if holds(&perms, who, PermissionLabel::Read) {
                        prop_assert_eq!(r.payload(), data.get(&key).map(|v| v.as_bytes()));
                    } else {
                        prop_assert_eq!(r.error_kind(), Some(ErrorKind::Forbidden));
                    }
                }
                Action::Request(who) => {
                    let r = fixture.contract.invoke(&parties[who], "permissionRequest", &[] as &[&str]);
                    if pending.is_some() {
                        prop_assert_eq!(r.error_kind(), Some(ErrorKind::RequestAlreadyPending));
                    } else {
                        prop_assert!(r.is_success());
                        pending = Some(who);
                    }
                }
                Action::Grant(who, read_write) => {
                    let op = if read_write { "addReadWritePermission" } else { "addReadPermission" };
                    let r = fixture.contract.invoke(&parties[who], op, &[] as &[&str]);
                    if !holds(&perms, who, PermissionLabel::Admin) {
                        prop_assert_eq!(r.error_kind(), Some(ErrorKind::Forbidden));
                    } else if let Some(requester) = pending.take() {
                        prop_assert!(r.is_success());
                        let granted = if read_write { PermissionSet::read_write() } else { PermissionSet::read_only() };
                        perms.insert(requester, granted);
                    } else {
                        prop_assert_eq!(r.error_kind(), Some(ErrorKind::NoPendingRequest));
                    }
                }
            }
        }

        // At most one admin ever, and only the deployer.
        for who in 0..2 {
            prop_assert!(!holds(&perms, who, PermissionLabel::Admin));
            prop_assert!(!fixture.has(&parties[who], PermissionLabel::Admin));
        }
        for (who, party) in parties.iter().enumerate() {
            for label in PermissionLabel::ALL {
                prop_assert_eq!(fixture.has(party, label), holds(&perms, who, label));
            }
        }
    }
}
