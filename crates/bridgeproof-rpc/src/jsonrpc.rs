//! JSON-RPC 2.0 envelope and error classification.
//!
//! Nodes report "I cannot serve this" conditions as error objects with
//! free-form messages and client-specific codes. This module maps them onto
//! the error kinds a caller can act on: pruned state is worth retrying
//! against an archive node, an unknown block is not.

use bridgeproof_core::UnlockError;
use serde::{Deserialize, Serialize};

/// JSON-RPC request.
#[derive(Serialize, Deserialize, Debug)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Vec<serde_json::Value>,
    pub id: u64,
}

impl JsonRpcRequest {
    pub fn new(method: &str, params: Vec<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: 1,
        }
    }
}

/// JSON-RPC response.
#[derive(Serialize, Deserialize, Debug)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Message fragments geth, erigon, nethermind and reth use for state they
/// no longer hold.
const PRUNED_STATE_MARKERS: &[&str] = &[
    "missing trie node",
    "historical state",
    "pruned",
    "state not available",
    "state is not available",
];

/// Message fragments for a block the node does not know.
const UNKNOWN_BLOCK_MARKERS: &[&str] = &["header not found", "unknown block", "block not found"];

impl JsonRpcError {
    /// Map the error object onto an [`UnlockError`] for a request at `block`.
    pub fn classify(&self, block: u64) -> UnlockError {
        let message = self.message.to_lowercase();
        if PRUNED_STATE_MARKERS.iter().any(|m| message.contains(m)) {
            UnlockError::ProofUnavailable {
                block,
                reason: self.message.clone(),
            }
        } else if UNKNOWN_BLOCK_MARKERS.iter().any(|m| message.contains(m)) {
            UnlockError::BlockNotFound { block }
        } else {
            UnlockError::Rpc {
                code: self.code,
                message: self.message.clone(),
            }
        }
    }
}
