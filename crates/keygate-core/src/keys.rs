//! Keys reserved by the request/grant workflow.
//!
//! Everything else in the state store is either a permission set (stored under
//! an [`Identity`](crate::Identity)) or a caller-chosen private entry.

/// Slot holding the raw credential of the single pending requester.
pub const PENDING_REQUEST_KEY: &str = "permissionRequest";

/// Slot holding the raw credential of the most recently granted requester.
pub const LAST_GRANTED_USER_KEY: &str = "lastGrantedUser";

/// All keys with workflow meaning.
pub const RESERVED_KEYS: [&str; 2] = [PENDING_REQUEST_KEY, LAST_GRANTED_USER_KEY];

/// Check whether `key` is one of the workflow slots.
///
/// Private entries are not checked against this; it exists so callers and
/// tests can tell the slots apart from data.
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_keys() {
        assert!(is_reserved_key("permissionRequest"));
        assert!(is_reserved_key("lastGrantedUser"));
        assert!(!is_reserved_key("permissionrequest"));
        assert!(!is_reserved_key(""));
    }
}
