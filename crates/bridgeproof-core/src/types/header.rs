use alloy_primitives::{Address, Bloom, Bytes, B256, B64, U256};
use serde::{Deserialize, Serialize};

/// Execution-layer block header fields, already normalized to their typed form.
///
/// The first fifteen fields exist in every block. The remaining fields were
/// appended by successive forks and are `None` for blocks produced before
/// the fork that introduced them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeaderFields {
    pub parent_hash: B256,
    pub uncles_hash: B256,
    pub beneficiary: Address,
    pub state_root: B256,
    pub transactions_root: B256,
    pub receipts_root: B256,
    pub logs_bloom: Bloom,
    /// Zero after the merge.
    pub difficulty: U256,
    pub number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub extra_data: Bytes,
    /// `prevRandao` after the merge.
    pub mix_hash: B256,
    /// Proof-of-work nonce, always 8 bytes on the wire.
    pub nonce: B64,
    /// London (EIP-1559).
    pub base_fee_per_gas: Option<u64>,
    /// Shanghai (EIP-4895).
    pub withdrawals_root: Option<B256>,
    /// Cancun (EIP-4844).
    pub blob_gas_used: Option<u64>,
    /// Cancun (EIP-4844).
    pub excess_blob_gas: Option<u64>,
    /// Cancun (EIP-4788).
    pub parent_beacon_block_root: Option<B256>,
    /// Prague (EIP-7685).
    pub requests_hash: Option<B256>,
    /// Hash reported by the state query interface. Never encoded; only used
    /// to check that the re-encoded header hashes to the same value.
    #[serde(default)]
    pub reported_hash: Option<B256>,
}

/// Header layout generation, named after the fork that last extended it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeaderFork {
    /// The fifteen original fields only.
    Frontier,
    /// Adds `base_fee_per_gas`.
    London,
    /// Adds `withdrawals_root`.
    Shanghai,
    /// Adds `blob_gas_used`, `excess_blob_gas`, `parent_beacon_block_root`.
    Cancun,
    /// Adds `requests_hash`.
    Prague,
}

impl HeaderFork {
    /// Number of RLP list items a header of this layout carries.
    pub fn field_count(self) -> usize {
        match self {
            HeaderFork::Frontier => 15,
            HeaderFork::London => 16,
            HeaderFork::Shanghai => 17,
            HeaderFork::Cancun => 20,
            HeaderFork::Prague => 21,
        }
    }
}

impl BlockHeaderFields {
    /// Presence flags for the fork-dependent tail, in encoding order.
    pub(crate) fn tail_presence(&self) -> [(&'static str, bool); 6] {
        [
            ("base_fee_per_gas", self.base_fee_per_gas.is_some()),
            ("withdrawals_root", self.withdrawals_root.is_some()),
            ("blob_gas_used", self.blob_gas_used.is_some()),
            ("excess_blob_gas", self.excess_blob_gas.is_some()),
            ("parent_beacon_block_root", self.parent_beacon_block_root.is_some()),
            ("requests_hash", self.requests_hash.is_some()),
        ]
    }

    /// The layout this header uses, judged by the last tail field present.
    ///
    /// This does not check that the tail is contiguous; `encode_header`
    /// rejects headers with gaps.
    pub fn fork(&self) -> HeaderFork {
        if self.requests_hash.is_some() {
            HeaderFork::Prague
        } else if self.parent_beacon_block_root.is_some()
            || self.excess_blob_gas.is_some()
            || self.blob_gas_used.is_some()
        {
            HeaderFork::Cancun
        } else if self.withdrawals_root.is_some() {
            HeaderFork::Shanghai
        } else if self.base_fee_per_gas.is_some() {
            HeaderFork::London
        } else {
            HeaderFork::Frontier
        }
    }
}
