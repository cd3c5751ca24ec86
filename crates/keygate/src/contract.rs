//! The Contract: the operations a host invokes.
//!
//! Every call resolves the caller identity first. All calls except
//! initialization and request submission then check a permission label
//! before touching the store.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use keygate_core::{CredentialSource, Identity, PermissionLabel, PermissionSet};
use keygate_perms::{EventSink, GrantKind, GrantOutcome, GrantWorkflow, PermissionLedger};
use keygate_store::StateStore;

use crate::config::ContractConfig;
use crate::error::{ContractError, Result};
use crate::response::Response;

/// Named operations of the dispatch surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `putPrivate <key> <value>`
    PutPrivate,
    /// `getPrivate <key>`
    GetPrivate,
    /// `permissionRequest`
    PermissionRequest,
    /// `addReadWritePermission`
    AddReadWritePermission,
    /// `addReadPermission`
    AddReadPermission,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::PutPrivate,
        Operation::GetPrivate,
        Operation::PermissionRequest,
        Operation::AddReadWritePermission,
        Operation::AddReadPermission,
    ];

    /// Wire name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::PutPrivate => "putPrivate",
            Operation::GetPrivate => "getPrivate",
            Operation::PermissionRequest => "permissionRequest",
            Operation::AddReadWritePermission => "addReadWritePermission",
            Operation::AddReadPermission => "addReadPermission",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// The permission-gated store.
///
/// Generic over the state store and the event sink so the host can supply
/// its own ledger and notification channel.
pub struct Contract<S, E> {
    workflow: GrantWorkflow<S, E>,
    config: ContractConfig,
}

impl<S: StateStore, E: EventSink> Contract<S, E> {
    /// Create a contract over `store`, emitting grant events to `events`.
    pub fn new(store: S, events: E, config: ContractConfig) -> Self {
        Self {
            workflow: GrantWorkflow::new(store, events),
            config,
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        self.workflow.ledger().store()
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// The permission ledger.
    pub fn ledger(&self) -> &PermissionLedger<S> {
        self.workflow.ledger()
    }

    /// The request/grant workflow.
    pub fn workflow(&self) -> &GrantWorkflow<S, E> {
        &self.workflow
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Initialization
    // ─────────────────────────────────────────────────────────────────────────

    /// Seed the deployer with `{read, write, admin}`.
    ///
    /// This is the only path that ever creates `admin`. The host must route
    /// it only from deployment and run it once: the contract keeps no record
    /// of having been initialized, so any later caller reaching `init` or
    /// [`instantiate`](Self::instantiate) seeds itself as a second admin.
    pub fn init<C: CredentialSource + ?Sized>(&self, caller: &C) -> Result<Identity> {
        let (deployer, _) = Identity::of_caller(caller)?;
        let full = PermissionSet::full();

        self.ledger().assign(&deployer, &full)?;

        if self.config.verify_init_write {
            match self.ledger().permissions_of(&deployer)? {
                Some(stored) if stored == full => {}
                Some(stored) => {
                    return Err(ContractError::InitVerification(format!(
                        "deployer holds {stored}, expected {full}"
                    )))
                }
                None => {
                    return Err(ContractError::InitVerification(
                        "deployer permissions missing after write".to_string(),
                    ))
                }
            }
        }

        tracing::info!(deployer = %deployer.fingerprint(), "contract initialized");
        Ok(deployer)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Access checks
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether `identity` holds `label`. Fails closed.
    pub fn has_permission(&self, identity: &Identity, label: PermissionLabel) -> bool {
        self.ledger().has_permission(identity, label)
    }

    /// Resolve the caller and require `label`.
    fn authorize<C: CredentialSource + ?Sized>(
        &self,
        caller: &C,
        label: PermissionLabel,
    ) -> Result<Identity> {
        let (identity, _) = Identity::of_caller(caller)?;
        self.ledger().require(&identity, label)?;
        Ok(identity)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private store operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Overwrite the private entry at `key`. Requires `write`.
    pub fn put_private<C: CredentialSource + ?Sized>(
        &self,
        caller: &C,
        key: &str,
        value: &[u8],
    ) -> Result<()> {
        let identity = self.authorize(caller, PermissionLabel::Write)?;
        let key = require_key(Some(key))?;
        self.write_entry(&identity, key, value)
    }

    /// Read the private entry at `key`. Requires `read`.
    ///
    /// A missing entry is `Ok(None)`, not an error.
    pub fn get_private<C: CredentialSource + ?Sized>(
        &self,
        caller: &C,
        key: &str,
    ) -> Result<Option<Bytes>> {
        let identity = self.authorize(caller, PermissionLabel::Read)?;
        let key = require_key(Some(key))?;
        self.read_entry(&identity, key)
    }

    fn write_entry(&self, identity: &Identity, key: &str, value: &[u8]) -> Result<()> {
        self.store().put(key, value)?;
        tracing::debug!(
            identity = %identity.fingerprint(),
            key,
            len = value.len(),
            "private entry written"
        );
        Ok(())
    }

    fn read_entry(&self, identity: &Identity, key: &str) -> Result<Option<Bytes>> {
        let value = self.store().get(key)?;
        tracing::debug!(
            identity = %identity.fingerprint(),
            key,
            found = value.is_some(),
            "private entry read"
        );
        Ok(value)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Request/grant workflow
    // ─────────────────────────────────────────────────────────────────────────

    /// Ask for access. Open to any caller; fails if a request is pending.
    pub fn request_permission<C: CredentialSource + ?Sized>(&self, caller: &C) -> Result<()> {
        let (_, credential) = Identity::of_caller(caller)?;
        self.workflow.submit_request(&credential)?;
        Ok(())
    }

    /// Grant the pending requester `{read, write}`. Requires `admin`.
    pub fn grant_read_write<C: CredentialSource + ?Sized>(
        &self,
        caller: &C,
    ) -> Result<GrantOutcome> {
        self.grant(caller, GrantKind::ReadWrite)
    }

    /// Grant the pending requester `{read}`. Requires `admin`.
    pub fn grant_read<C: CredentialSource + ?Sized>(&self, caller: &C) -> Result<GrantOutcome> {
        self.grant(caller, GrantKind::Read)
    }

    fn grant<C: CredentialSource + ?Sized>(
        &self,
        caller: &C,
        kind: GrantKind,
    ) -> Result<GrantOutcome> {
        let (admin, _) = Identity::of_caller(caller)?;
        Ok(self.workflow.grant(&admin, kind)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dispatch surface
    // ─────────────────────────────────────────────────────────────────────────

    /// Initialization entry point in envelope form.
    pub fn instantiate<C: CredentialSource + ?Sized>(&self, caller: &C) -> Response {
        match self.init(caller) {
            Ok(_) => Response::ok(),
            Err(e) => {
                tracing::warn!(error = %e, "initialization failed");
                e.into()
            }
        }
    }

    /// Run the operation named `function` with positional `args`.
    ///
    /// Unknown names succeed with an informational payload so callers can
    /// probe for capabilities.
    pub fn invoke<C, A>(&self, caller: &C, function: &str, args: &[A]) -> Response
    where
        C: CredentialSource + ?Sized,
        A: AsRef<str>,
    {
        let op = match function.parse::<Operation>() {
            Ok(op) => op,
            Err(name) => {
                tracing::debug!(operation = %name, "unsupported operation");
                return Response::with_payload(
                    self.config.unsupported_operation_message.clone().into_bytes(),
                );
            }
        };

        tracing::debug!(operation = %op, args = args.len(), "invoking");
        let result = self.dispatch(caller, op, args);
        if let Err(e) = &result {
            tracing::debug!(operation = %op, kind = %e.kind(), error = %e, "operation failed");
        }
        result.into()
    }

    fn dispatch<C, A>(&self, caller: &C, op: Operation, args: &[A]) -> Result<Option<Bytes>>
    where
        C: CredentialSource + ?Sized,
        A: AsRef<str>,
    {
        match op {
            Operation::PutPrivate => {
                let identity = self.authorize(caller, PermissionLabel::Write)?;
                let (key, value) = match (arg(args, 0), arg(args, 1)) {
                    (Some(key), Some(value)) => (require_key(Some(key))?, value),
                    _ => {
                        return Err(ContractError::InvalidArgument(
                            "putPrivate requires two arguments, a key and value".to_string(),
                        ))
                    }
                };
                self.write_entry(&identity, key, value.as_bytes())?;
                Ok(None)
            }
            Operation::GetPrivate => {
                let identity = self.authorize(caller, PermissionLabel::Read)?;
                let key = require_key(arg(args, 0))?;
                self.read_entry(&identity, key)
            }
            Operation::PermissionRequest => {
                self.request_permission(caller)?;
                Ok(None)
            }
            Operation::AddReadWritePermission => {
                self.grant_read_write(caller)?;
                Ok(None)
            }
            Operation::AddReadPermission => {
                self.grant_read(caller)?;
                Ok(None)
            }
        }
    }
}

/// Positional argument `i`, if supplied.
fn arg<A: AsRef<str>>(args: &[A], i: usize) -> Option<&str> {
    args.get(i).map(AsRef::as_ref)
}

/// A key counts as supplied only when present and non-empty.
fn require_key(key: Option<&str>) -> Result<&str> {
    match key {
        Some(key) if !key.is_empty() => Ok(key),
        Some(_) => Err(ContractError::InvalidArgument(
            "key must not be empty".to_string(),
        )),
        None => Err(ContractError::InvalidArgument(
            "operation requires a key argument".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keygate_core::{CoreError, Credential, ErrorKind};
    use keygate_perms::MemoryEventSink;
    use keygate_store::MemoryStore;

    type TestContract = Contract<MemoryStore, MemoryEventSink>;

    fn contract() -> TestContract {
        Contract::new(
            MemoryStore::new(),
            MemoryEventSink::new(),
            ContractConfig::default(),
        )
    }

    /// Host whose credential lookup fails.
    struct NoCreator;

    impl CredentialSource for NoCreator {
        fn caller_credential(&self) -> keygate_core::Result<Credential> {
            Err(CoreError::CredentialUnavailable("creator not set".into()))
        }
    }

    #[test]
    fn test_operation_names() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        }
        assert!("put".parse::<Operation>().is_err());
        assert!("PutPrivate".parse::<Operation>().is_err());
    }

    #[test]
    fn test_init_seeds_deployer_only() {
        let c = contract();
        let deployer = c.init(&Credential::from("deployer")).unwrap();

        for label in PermissionLabel::ALL {
            assert!(c.has_permission(&deployer, label));
        }

        let other = Identity::resolve(b"someone-else").unwrap();
        for label in PermissionLabel::ALL {
            assert!(!c.has_permission(&other, label));
        }
    }

    #[test]
    fn test_repeated_init_seeds_each_caller() {
        let c = contract();
        let first = c.init(&Credential::from("deployer")).unwrap();
        let second = c.init(&Credential::from("late-caller")).unwrap();

        // Gating repeat calls is up to the host.
        assert!(c.has_permission(&first, PermissionLabel::Admin));
        assert!(c.has_permission(&second, PermissionLabel::Admin));
    }

    #[test]
    fn test_init_without_credential() {
        let c = contract();
        let err = c.init(&NoCreator).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IdentityResolution);
        assert!(c.store().is_empty().unwrap());
    }

    #[test]
    fn test_init_with_empty_credential() {
        let c = contract();
        let response = c.instantiate(&Credential::from(""));
        assert_eq!(response.error_kind(), Some(ErrorKind::IdentityResolution));
    }

    #[test]
    fn test_put_requires_write_before_arguments() {
        let c = contract();
        c.init(&Credential::from("deployer")).unwrap();

        // No write permission and no arguments: Forbidden wins.
        let r = c.invoke(&Credential::from("stranger"), "putPrivate", &[] as &[&str]);
        assert_eq!(r.error_kind(), Some(ErrorKind::Forbidden));
    }

    #[test]
    fn test_put_missing_value() {
        let c = contract();
        let deployer = Credential::from("deployer");
        c.init(&deployer).unwrap();

        let r = c.invoke(&deployer, "putPrivate", &["only-key"]);
        assert_eq!(r.error_kind(), Some(ErrorKind::InvalidArgument));
        assert_eq!(c.store().get("only-key").unwrap(), None);
    }

    #[test]
    fn test_get_missing_key_argument() {
        let c = contract();
        let deployer = Credential::from("deployer");
        c.init(&deployer).unwrap();

        let r = c.invoke(&deployer, "getPrivate", &[] as &[&str]);
        assert_eq!(r.error_kind(), Some(ErrorKind::InvalidArgument));

        let r = c.invoke(&deployer, "getPrivate", &[""]);
        assert_eq!(r.error_kind(), Some(ErrorKind::InvalidArgument));
    }

    #[test]
    fn test_put_get_via_dispatch() {
        let c = contract();
        let deployer = Credential::from("deployer");
        c.init(&deployer).unwrap();

        let r = c.invoke(&deployer, "putPrivate", &["color", "blue", "ignored"]);
        assert_eq!(r, Response::ok());

        let r = c.invoke(&deployer, "getPrivate", &["color"]);
        assert_eq!(r.payload(), Some(&b"blue"[..]));
    }

    #[test]
    fn test_empty_value_is_stored() {
        let c = contract();
        let deployer = Credential::from("deployer");
        c.init(&deployer).unwrap();

        c.put_private(&deployer, "blank", b"").unwrap();
        assert_eq!(
            c.get_private(&deployer, "blank").unwrap(),
            Some(Bytes::new())
        );
    }

    #[test]
    fn test_unsupported_operation_soft_fails() {
        let c = contract();
        let r = c.invoke(&Credential::from("anyone"), "keys", &[] as &[&str]);
        assert!(r.is_success());
        assert_eq!(r.payload(), Some(&b"Unsupported operation"[..]));
    }

    #[test]
    fn test_unsupported_operation_message_configurable() {
        let config = ContractConfig {
            unsupported_operation_message: "nope".to_string(),
            ..ContractConfig::default()
        };
        let c = Contract::new(MemoryStore::new(), MemoryEventSink::new(), config);
        let r = c.invoke(&NoCreator, "remove", &["k"]);
        assert_eq!(r.payload(), Some(&b"nope"[..]));
    }

    #[test]
    fn test_request_without_credential() {
        let c = contract();
        let r = c.invoke(&NoCreator, "permissionRequest", &[] as &[&str]);
        assert_eq!(r.error_kind(), Some(ErrorKind::IdentityResolution));
        assert_eq!(c.workflow().pending_request().unwrap(), None);
    }
}
