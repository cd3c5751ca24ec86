//! Golden test vectors for deterministic verification.
//!
//! These pin the two stored formats other tools read directly out of the
//! state store: identity keys and permission sets.

use keygate_core::{Identity, PermissionLabel, PermissionSet};

/// A golden identity vector.
#[derive(Debug, Clone)]
pub struct IdentityVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Raw credential bytes.
    pub credential: &'static [u8],
    /// Expected canonical identity.
    pub expected: &'static str,
}

/// A golden permission-set vector.
#[derive(Debug, Clone)]
pub struct PermissionVector {
    pub name: &'static str,
    pub labels: &'static [PermissionLabel],
    /// Expected stored form (hex CBOR).
    pub expected_hex: &'static str,
}

/// Get all identity vectors.
pub fn identity_vectors() -> Vec<IdentityVector> {
    vec![
        IdentityVector {
            name: "plain ascii",
            credential: b"alice",
            expected: "identity/alice",
        },
        IdentityVector {
            name: "distinguished name",
            credential: b"CN=alice,O=Org1",
            expected: "identity/CN%3Dalice%2CO%3DOrg1",
        },
        IdentityVector {
            name: "unreserved punctuation kept",
            credential: b"a-b_c.d~e",
            expected: "identity/a-b_c.d~e",
        },
        IdentityVector {
            name: "percent and slash escaped",
            credential: b"50%/x",
            expected: "identity/50%25%2Fx",
        },
        IdentityVector {
            name: "reserved key name as credential",
            credential: b"permissionRequest",
            expected: "identity/permissionRequest",
        },
        IdentityVector {
            name: "binary bytes",
            credential: &[0x00, 0xff, 0x0a],
            expected: "identity/%00%FF%0A",
        },
        IdentityVector {
            name: "pem header",
            credential: b"-----BEGIN CERTIFICATE-----\n",
            expected: "identity/-----BEGIN%20CERTIFICATE-----%0A",
        },
    ]
}

/// Get all permission-set vectors.
pub fn permission_vectors() -> Vec<PermissionVector> {
    vec![
        PermissionVector {
            name: "empty",
            labels: &[],
            expected_hex: "80",
        },
        PermissionVector {
            name: "read only",
            labels: &[PermissionLabel::Read],
            expected_hex: "816472656164",
        },
        PermissionVector {
            name: "read write",
            labels: &[PermissionLabel::Read, PermissionLabel::Write],
            expected_hex: "826472656164657772697465",
        },
        PermissionVector {
            name: "full, inserted out of order",
            labels: &[
                PermissionLabel::Admin,
                PermissionLabel::Read,
                PermissionLabel::Write,
            ],
            expected_hex: "8364726561646577726974656561646d696e",
        },
    ]
}

/// Check every vector against the current implementation.
///
/// Returns `(name, matches, actual)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let identities = identity_vectors().into_iter().map(|v| {
        let actual = match Identity::resolve(v.credential) {
            Ok(id) => id.as_str().to_string(),
            Err(e) => format!("error: {e}"),
        };
        (v.name.to_string(), actual == v.expected, actual)
    });

    let sets = permission_vectors().into_iter().map(|v| {
        let set = PermissionSet::from_labels(v.labels.iter().copied());
        let actual = match set.encode() {
            Ok(bytes) => hex::encode(bytes),
            Err(e) => format!("error: {e}"),
        };
        (v.name.to_string(), actual == v.expected_hex, actual)
    });

    identities.chain(sets).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, actual) in verify_all_vectors() {
            assert!(matches, "vector '{name}' produced {actual}");
        }
    }

    #[test]
    fn test_identity_vectors_round_trip() {
        for v in identity_vectors() {
            let id = Identity::resolve(v.credential).unwrap();
            assert_eq!(id.credential().unwrap().as_bytes(), v.credential, "{}", v.name);
        }
    }

    #[test]
    fn test_permission_vectors_decode() {
        for v in permission_vectors() {
            let bytes = hex::decode(v.expected_hex).unwrap();
            let set = PermissionSet::decode(&bytes).unwrap();
            assert_eq!(set, PermissionSet::from_labels(v.labels.iter().copied()), "{}", v.name);
        }
    }
}
