//! The request/grant workflow.
//!
//! A single slot holds at most one pending request:
//!
//! ```text
//!            submit_request            grant(Read | ReadWrite)
//!   Empty  ─────────────────▶ Pending ─────────────────────────▶ Empty
//! ```
//!
//! Submitting is open to anyone. Granting requires `admin`, replaces the
//! requester's permission set, emits an event keyed by the requester, records
//! the requester as last granted, and clears the slot, in that order.

use keygate_core::{
    Credential, Identity, PermissionLabel, PermissionSet, LAST_GRANTED_USER_KEY,
    PENDING_REQUEST_KEY,
};
use keygate_store::StateStore;

use crate::error::{PermsError, Result};
use crate::event::{EventSink, GrantEvent};
use crate::grant::{GrantKind, GrantOutcome, GrantStep};
use crate::ledger::PermissionLedger;

/// Drives the pending-request slot through its cycle.
pub struct GrantWorkflow<S, E> {
    ledger: PermissionLedger<S>,
    events: E,
}

impl<S: StateStore, E: EventSink> GrantWorkflow<S, E> {
    pub fn new(store: S, events: E) -> Self {
        Self {
            ledger: PermissionLedger::new(store),
            events,
        }
    }

    /// The permission ledger over the same store.
    pub fn ledger(&self) -> &PermissionLedger<S> {
        &self.ledger
    }

    /// Raw credential waiting in the slot, if any.
    pub fn pending_request(&self) -> Result<Option<Credential>> {
        let value = self.ledger.store().get(PENDING_REQUEST_KEY)?;
        Ok(value.map(|bytes| Credential::new(bytes.to_vec())))
    }

    /// Raw credential of the most recently granted requester.
    pub fn last_granted_user(&self) -> Result<Option<Credential>> {
        let value = self.ledger.store().get(LAST_GRANTED_USER_KEY)?;
        Ok(value.map(|bytes| Credential::new(bytes.to_vec())))
    }

    /// Put `credential` into the empty slot.
    ///
    /// The credential must resolve to an identity; anything that could not be
    /// granted later never reaches the slot. The check and the write are two
    /// store calls; the host must serialize transactions touching the slot.
    pub fn submit_request(&self, credential: &Credential) -> Result<()> {
        let requester = credential.identity()?;
        let store = self.ledger.store();

        if store.get(PENDING_REQUEST_KEY)?.is_some() {
            return Err(PermsError::RequestAlreadyPending);
        }

        store.put(PENDING_REQUEST_KEY, credential.as_bytes())?;
        tracing::info!(requester = %requester.fingerprint(), "permission request submitted");
        Ok(())
    }

    /// Resolve the pending request in favour of its requester.
    ///
    /// Errors before the requester's permissions are written leave the store
    /// untouched. Errors after that are reported as
    /// [`PermsError::PartialGrant`]: the new permissions are in effect even
    /// though the operation failed.
    pub fn grant(&self, admin: &Identity, kind: GrantKind) -> Result<GrantOutcome> {
        self.ledger.require(admin, PermissionLabel::Admin)?;

        let store = self.ledger.store();
        let credential = self
            .pending_request()?
            .ok_or(PermsError::NoPendingRequest)?;
        let requester = credential.identity()?;
        let granted: PermissionSet = kind.permission_set();
        let event = GrantEvent::new(kind).to_bytes()?;

        self.ledger.assign(&requester, &granted)?;

        let partial = |step: GrantStep, source: PermsError| {
            tracing::warn!(
                requester = %requester.fingerprint(),
                %step,
                error = %source,
                "grant partially applied"
            );
            PermsError::PartialGrant {
                requester: requester.fingerprint(),
                step,
                source: Box::new(source),
            }
        };

        self.events
            .emit(requester.as_str(), &event)
            .map_err(|e| partial(GrantStep::EmitEvent, e.into()))?;
        store
            .put(LAST_GRANTED_USER_KEY, credential.as_bytes())
            .map_err(|e| partial(GrantStep::RecordLastGranted, e.into()))?;
        store
            .delete(PENDING_REQUEST_KEY)
            .map_err(|e| partial(GrantStep::ClearPending, e.into()))?;

        tracing::info!(
            admin = %admin.fingerprint(),
            requester = %requester.fingerprint(),
            granted = %granted,
            "permission request granted"
        );

        Ok(GrantOutcome {
            requester,
            credential,
            granted,
            kind,
        })
    }
}
