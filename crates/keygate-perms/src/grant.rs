//! Grant kinds and the steps a grant goes through.

use std::fmt;

use keygate_core::{Credential, Identity, PermissionSet};

/// What a grant operation hands to the pending requester.
///
/// There is no admin grant: `admin` is only ever seeded for the
/// deployer at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrantKind {
    /// `{read}`.
    Read,
    /// `{read, write}`.
    ReadWrite,
}

impl GrantKind {
    /// The permission set that replaces the requester's current one.
    pub fn permission_set(&self) -> PermissionSet {
        match self {
            GrantKind::Read => PermissionSet::read_only(),
            GrantKind::ReadWrite => PermissionSet::read_write(),
        }
    }

    /// Signal carried in the grant event payload.
    pub fn signal(&self) -> &'static str {
        match self {
            GrantKind::Read => "ReadPermission",
            GrantKind::ReadWrite => "ReadWritePermission",
        }
    }
}

/// Steps that run after the requester's permissions were written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantStep {
    /// Notify observers through the event sink.
    EmitEvent,
    /// Record the requester in the last-granted slot.
    RecordLastGranted,
    /// Delete the pending-request slot.
    ClearPending,
}

impl fmt::Display for GrantStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GrantStep::EmitEvent => "event emission",
            GrantStep::RecordLastGranted => "last granted user update",
            GrantStep::ClearPending => "pending request removal",
        })
    }
}

/// Result of a completed grant.
#[derive(Debug, Clone)]
pub struct GrantOutcome {
    /// Who received the permissions.
    pub requester: Identity,
    /// Raw credential that was pending.
    pub credential: Credential,
    /// The set now stored for the requester.
    pub granted: PermissionSet,
    pub kind: GrantKind,
}
