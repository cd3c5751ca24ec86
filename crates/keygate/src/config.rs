//! Contract configuration.

use serde::Deserialize;

/// Message returned for operation names the contract does not know.
pub const UNSUPPORTED_OPERATION: &str = "Unsupported operation";

/// Configuration for the contract.
///
/// Deserializable so a host can keep it next to its own settings; missing
/// fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Read the deployer's permission set back after initialization and fail
    /// if it does not match.
    pub verify_init_write: bool,
    /// Payload of the successful response to an unknown operation name.
    pub unsupported_operation_message: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            verify_init_write: true,
            unsupported_operation_message: UNSUPPORTED_OPERATION.to_string(),
        }
    }
}
