//! In-memory [`StateQuery`] for unit tests.

use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use bridgeproof_core::UnlockError;

use crate::api::{RpcBlock, RpcProof};
use crate::jsonrpc::JsonRpcError;
use crate::query::StateQuery;

/// Serves one canned block and one canned proof regardless of the request.
/// Missing entries behave like a node that returns `null`.
#[derive(Clone, Default)]
pub struct FixtureQuery {
    block: Option<RpcBlock>,
    proof: Option<RpcProof>,
    proof_error: Option<JsonRpcError>,
    block_error: Option<JsonRpcError>,
    offline: bool,
}

impl FixtureQuery {
    pub fn with_block(mut self, block: RpcBlock) -> Self {
        self.block = Some(block);
        self
    }

    pub fn with_proof(mut self, proof: RpcProof) -> Self {
        self.proof = Some(proof);
        self
    }

    pub fn failing_proof(mut self, code: i64, message: &str) -> Self {
        self.proof_error = Some(JsonRpcError {
            code,
            message: message.to_string(),
            data: None,
        });
        self
    }

    pub fn failing_block(mut self, code: i64, message: &str) -> Self {
        self.block_error = Some(JsonRpcError {
            code,
            message: message.to_string(),
            data: None,
        });
        self
    }

    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn sample_block(number: u64) -> RpcBlock {
        serde_json::from_value(serde_json::json!({
            "parentHash": format!("0x{}", "11".repeat(32)),
            "sha3Uncles": "0x1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347",
            "miner": "0x95222290dd7278aa3ddd389cc1e1d165cc4bafe5",
            "stateRoot": format!("0x{}", "22".repeat(32)),
            "transactionsRoot": format!("0x{}", "33".repeat(32)),
            "receiptsRoot": format!("0x{}", "44".repeat(32)),
            "logsBloom": format!("0x{}", "00".repeat(256)),
            "difficulty": "0x0",
            "number": format!("{number:#x}"),
            "gasLimit": "0x1c9c380",
            "gasUsed": "0x5208",
            "timestamp": "0x64369e57",
            "extraData": "0x",
            "mixHash": format!("0x{}", "55".repeat(32)),
            "nonce": "0x0000000000000000",
            "baseFeePerGas": "0x3b9aca00"
        }))
        .expect("sample block is well formed")
    }

    pub fn sample_proof() -> RpcProof {
        serde_json::from_value(serde_json::json!({
            "address": format!("0x{}", "aa".repeat(20)),
            "accountProof": ["0xc0", "0xc180"],
            "balance": "0x0",
            "codeHash": format!("0x{}", "bb".repeat(32)),
            "nonce": "0x1",
            "storageHash": format!("0x{}", "cc".repeat(32)),
            "storageProof": [{ "key": "0x0", "value": "0x1", "proof": ["0xc0"] }]
        }))
        .expect("sample proof is well formed")
    }

    fn offline_error(&self) -> Option<UnlockError> {
        self.offline.then(|| UnlockError::NetworkFailure {
            reason: "fixture is offline".to_string(),
        })
    }
}

#[async_trait]
impl StateQuery for FixtureQuery {
    async fn get_proof(
        &self,
        _address: Address,
        _slots: &[B256],
        block: u64,
    ) -> Result<RpcProof, UnlockError> {
        if let Some(err) = self.offline_error() {
            return Err(err);
        }
        if let Some(error) = &self.proof_error {
            return Err(error.classify(block));
        }
        self.proof.clone().ok_or_else(|| UnlockError::ProofUnavailable {
            block,
            reason: "eth_getProof returned null".to_string(),
        })
    }

    async fn get_block(&self, block: u64) -> Result<Option<RpcBlock>, UnlockError> {
        if let Some(err) = self.offline_error() {
            return Err(err);
        }
        if let Some(error) = &self.block_error {
            return Err(error.classify(block));
        }
        Ok(self.block.clone())
    }
}
