//! Caller-supplied configuration.
//!
//! Nothing here has a default that could silently point a proof at the wrong
//! contract or mapping: the endpoint, the bridge address and the mapping slot
//! must all be given.

use std::time::Duration;

use alloy_primitives::{Address, U256};
use bridgeproof_core::UnlockError;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::normalize::{self, RawQuantity};

/// Request timeout of the RPC client
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockProofConfig {
    /// Execution JSON-RPC endpoint of the source chain.
    pub rpc_url: Url,
    /// The bridge contract whose storage holds the processed flags.
    pub contract_address: Address,
    /// Declaration slot of the processed-transfers mapping.
    #[serde(deserialize_with = "deserialize_slot")]
    pub mapping_slot: U256,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Re-hash fetched headers and compare with the reported block hash.
    #[serde(default = "default_verify_block_hash")]
    pub verify_block_hash: bool,
}

fn default_verify_block_hash() -> bool {
    true
}

/// Accept the slot as a JSON number, a decimal string or a hex string.
fn deserialize_slot<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    let raw = RawQuantity::deserialize(deserializer)?;
    normalize::integer("mapping_slot", &raw).map_err(serde::de::Error::custom)
}

impl UnlockProofConfig {
    pub fn new(rpc_url: Url, contract_address: Address, mapping_slot: U256) -> Self {
        Self {
            rpc_url,
            contract_address,
            mapping_slot,
            request_timeout_secs: None,
            verify_block_hash: true,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, UnlockError> {
        serde_json::from_str(json)
            .map_err(|e| UnlockError::invalid_input(format!("configuration: {e}")))
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_defaults() {
        let config = UnlockProofConfig::from_json(
            r#"{
                "rpc_url": "https://eth.example.org/v1",
                "contract_address": "0x00000000000000000000000000000000000000ff",
                "mapping_slot": 302
            }"#,
        )
        .unwrap();
        assert_eq!(config.mapping_slot, U256::from(302u64));
        assert_eq!(config.contract_address, Address::with_last_byte(0xFF));
        assert!(config.verify_block_hash);
        assert_eq!(config.request_timeout(), DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_from_json_slot_forms_and_overrides() {
        let config = UnlockProofConfig::from_json(
            r#"{
                "rpc_url": "http://127.0.0.1:8545",
                "contract_address": "0x00000000000000000000000000000000000000ff",
                "mapping_slot": "0x12e",
                "request_timeout_secs": 5,
                "verify_block_hash": false
            }"#,
        )
        .unwrap();
        assert_eq!(config.mapping_slot, U256::from(302u64));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert!(!config.verify_block_hash);
    }

    #[test]
    fn test_missing_fields_rejected() {
        let err = UnlockProofConfig::from_json(r#"{ "rpc_url": "http://127.0.0.1:8545" }"#)
            .unwrap_err();
        assert!(matches!(err, UnlockError::InvalidInput { .. }));

        let err = UnlockProofConfig::from_json(
            r#"{
                "rpc_url": "not a url",
                "contract_address": "0x00000000000000000000000000000000000000ff",
                "mapping_slot": 302
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, UnlockError::InvalidInput { .. }));
    }
}
