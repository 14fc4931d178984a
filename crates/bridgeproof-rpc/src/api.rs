//! Execution JSON-RPC format adapter.
//!
//! `eth_getBlockByNumber` and `eth_getProof` return camelCase JSON whose
//! shape differs from bridgeproof-core's typed structs. This module defines
//! serde types matching the wire format and converts them through
//! [`crate::normalize`].
//!
//! Key differences:
//! - Numbers arrive as hex strings, decimal strings or JSON numbers
//! - Fork-dependent header fields are absent or `null` on older blocks
//! - Proof nodes are `0x`-prefixed hex strings

use bridgeproof_core::{AccountState, BlockHeaderFields, RawProofResponse, UnlockError};
use serde::{Deserialize, Serialize};

use crate::normalize::{self, RawQuantity};

// ---------------------------------------------------------------------------
// eth_getBlockByNumber
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcBlock {
    pub hash: Option<String>,
    pub parent_hash: String,
    pub sha3_uncles: String,
    pub miner: String,
    pub state_root: String,
    pub transactions_root: String,
    pub receipts_root: String,
    pub logs_bloom: String,
    /// Post-merge endpoints print zero, `null` or nothing at all.
    #[serde(default)]
    pub difficulty: Option<RawQuantity>,
    pub number: RawQuantity,
    pub gas_limit: RawQuantity,
    pub gas_used: RawQuantity,
    pub timestamp: RawQuantity,
    pub extra_data: String,
    pub mix_hash: String,
    pub nonce: RawQuantity,
    #[serde(default)]
    pub base_fee_per_gas: Option<RawQuantity>,
    #[serde(default)]
    pub withdrawals_root: Option<String>,
    #[serde(default)]
    pub blob_gas_used: Option<RawQuantity>,
    #[serde(default)]
    pub excess_blob_gas: Option<RawQuantity>,
    #[serde(default)]
    pub parent_beacon_block_root: Option<String>,
    #[serde(default)]
    pub requests_hash: Option<String>,
}

impl RpcBlock {
    pub fn to_header_fields(&self) -> Result<BlockHeaderFields, UnlockError> {
        Ok(BlockHeaderFields {
            parent_hash: normalize::hash("parentHash", &self.parent_hash)?,
            uncles_hash: normalize::hash("sha3Uncles", &self.sha3_uncles)?,
            beneficiary: normalize::address("miner", &self.miner)?,
            state_root: normalize::hash("stateRoot", &self.state_root)?,
            transactions_root: normalize::hash("transactionsRoot", &self.transactions_root)?,
            receipts_root: normalize::hash("receiptsRoot", &self.receipts_root)?,
            logs_bloom: normalize::bloom("logsBloom", &self.logs_bloom)?,
            difficulty: normalize::integer_or_zero("difficulty", self.difficulty.as_ref())?,
            number: normalize::integer_u64("number", &self.number)?,
            gas_limit: normalize::integer_u64("gasLimit", &self.gas_limit)?,
            gas_used: normalize::integer_u64("gasUsed", &self.gas_used)?,
            timestamp: normalize::integer_u64("timestamp", &self.timestamp)?,
            extra_data: normalize::bytes("extraData", &self.extra_data)?,
            mix_hash: normalize::hash("mixHash", &self.mix_hash)?,
            nonce: normalize::nonce("nonce", &self.nonce)?,
            base_fee_per_gas: normalize::optional_integer(
                "baseFeePerGas",
                self.base_fee_per_gas.as_ref(),
            )?,
            withdrawals_root: normalize::optional_hash(
                "withdrawalsRoot",
                self.withdrawals_root.as_deref(),
            )?,
            blob_gas_used: normalize::optional_integer("blobGasUsed", self.blob_gas_used.as_ref())?,
            excess_blob_gas: normalize::optional_integer(
                "excessBlobGas",
                self.excess_blob_gas.as_ref(),
            )?,
            parent_beacon_block_root: normalize::optional_hash(
                "parentBeaconBlockRoot",
                self.parent_beacon_block_root.as_deref(),
            )?,
            requests_hash: normalize::optional_hash("requestsHash", self.requests_hash.as_deref())?,
            reported_hash: normalize::optional_hash("hash", self.hash.as_deref())?,
        })
    }
}

// ---------------------------------------------------------------------------
// eth_getProof
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcProof {
    pub address: String,
    pub account_proof: Vec<String>,
    pub balance: RawQuantity,
    pub code_hash: String,
    pub nonce: RawQuantity,
    pub storage_hash: String,
    pub storage_proof: Vec<RpcStorageProof>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RpcStorageProof {
    pub key: String,
    pub value: RawQuantity,
    pub proof: Vec<String>,
}

impl RpcProof {
    /// Normalize the response for the single slot that was requested at
    /// `block`.
    ///
    /// Proof nodes are only hex-decoded. Their contents are not inspected.
    pub fn to_raw_proof(&self, block: u64) -> Result<RawProofResponse, UnlockError> {
        let storage = self
            .storage_proof
            .first()
            .ok_or_else(|| UnlockError::ProofUnavailable {
                block,
                reason: "response carries no storage proof entry".to_string(),
            })?;

        Ok(RawProofResponse {
            address: normalize::address("address", &self.address)?,
            account_proof: decode_nodes("accountProof", &self.account_proof)?,
            account: AccountState {
                nonce: normalize::integer_u64("nonce", &self.nonce)?,
                balance: normalize::integer("balance", &self.balance)?,
                storage_root: normalize::hash("storageHash", &self.storage_hash)?,
                code_hash: normalize::hash("codeHash", &self.code_hash)?,
            },
            storage_key: storage_key(&storage.key)?,
            storage_value: normalize::integer("storageProof.value", &storage.value)?,
            storage_proof: decode_nodes("storageProof.proof", &storage.proof)?,
        })
    }
}

/// Some clients echo the requested key trimmed of leading zeros.
fn storage_key(s: &str) -> Result<bridgeproof_core::StorageSlotKey, UnlockError> {
    let value = normalize::integer("storageProof.key", &RawQuantity::Text(s.to_string()))?;
    Ok(value.to_be_bytes::<32>().into())
}

fn decode_nodes(field: &str, nodes: &[String]) -> Result<Vec<Vec<u8>>, UnlockError> {
    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            normalize::bytes(&format!("{field}[{i}]"), node).map(|bytes| bytes.to_vec())
        })
        .collect()
}
