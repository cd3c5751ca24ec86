//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a contract over an in-memory
//! store, an initialized deployer, and a supply of distinct callers.

use std::sync::Arc;

use keygate::{Contract, ContractConfig};
use keygate_core::{Credential, Identity, PermissionLabel};
use keygate_perms::MemoryEventSink;
use keygate_store::{MemoryStore, StateStore};
use rand::RngCore;

/// A contract with an initialized deployer.
pub struct TestFixture<S = Arc<MemoryStore>> {
    pub contract: Contract<S, Arc<MemoryEventSink>>,
    pub events: Arc<MemoryEventSink>,
    pub deployer: Credential,
}

impl TestFixture<Arc<MemoryStore>> {
    /// Fixture over a fresh in-memory store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }
}

impl Default for TestFixture<Arc<MemoryStore>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateStore> TestFixture<S> {
    /// Fixture over `store`, initialized by a fixed deployer credential.
    pub fn with_store(store: S) -> Self {
        let events = Arc::new(MemoryEventSink::new());
        let contract = Contract::new(store, Arc::clone(&events), ContractConfig::default());
        let deployer = Credential::from("CN=deployer,OU=admin,O=Org1MSP");
        contract
            .init(&deployer)
            .expect("fixture deployer initialization failed");
        Self {
            contract,
            events,
            deployer,
        }
    }

    /// Identity of the deployer.
    pub fn deployer_id(&self) -> Identity {
        self.deployer
            .identity()
            .expect("fixture credential is non-empty")
    }

    /// Submit a request for `who` and grant it read-write.
    pub fn onboard_writer(&self, who: &Credential) {
        self.contract
            .request_permission(who)
            .expect("request failed");
        self.contract
            .grant_read_write(&self.deployer)
            .expect("grant failed");
    }

    /// Submit a request for `who` and grant it read-only.
    pub fn onboard_reader(&self, who: &Credential) {
        self.contract
            .request_permission(who)
            .expect("request failed");
        self.contract.grant_read(&self.deployer).expect("grant failed");
    }

    /// Whether `who` currently holds `label`.
    pub fn has(&self, who: &Credential, label: PermissionLabel) -> bool {
        match who.identity() {
            Ok(identity) => self.contract.has_permission(&identity, label),
            Err(_) => false,
        }
    }
}

/// A deterministic caller credential for party `index`.
pub fn user(index: usize) -> Credential {
    Credential::from(format!("CN=user{index},O=Org2MSP").into_bytes())
}

/// `count` distinct caller credentials.
pub fn users(count: usize) -> Vec<Credential> {
    (0..count).map(user).collect()
}

/// A random binary credential of `len` bytes (at least one).
pub fn random_credential(len: usize) -> Credential {
    let mut bytes = vec![0u8; len.max(1)];
    rand::thread_rng().fill_bytes(&mut bytes);
    Credential::new(bytes)
}
