use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

/// A 32-byte key inside a contract's storage trie.
pub type StorageSlotKey = B256;

/// The logical record a bridge contract marks as processed on unlock.
///
/// The contract stores `processed[keccak256(abi.encodePacked(token, recipient,
/// nonce, amount))]`, so these four values fully determine the storage slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicalKey {
    /// Token address on the source chain.
    pub token: Address,
    /// Recipient address on the source chain.
    pub recipient: Address,
    /// Transfer nonce assigned by the bridge.
    pub nonce: U256,
    /// Transferred amount in the token's base units.
    pub amount: U256,
}

impl LogicalKey {
    /// Length of the tightly packed `[address, address, uint256, uint256]` form.
    pub const PACKED_LEN: usize = 20 + 20 + 32 + 32;

    pub fn new(token: Address, recipient: Address, nonce: U256, amount: U256) -> Self {
        Self {
            token,
            recipient,
            nonce,
            amount,
        }
    }

    /// Tight (non-padded) packing, identical to Solidity's `abi.encodePacked`
    /// for these four types: addresses keep their 20 bytes, uint256 values are
    /// full 32-byte big-endian words.
    pub fn packed(&self) -> [u8; Self::PACKED_LEN] {
        let mut out = [0u8; Self::PACKED_LEN];
        out[..20].copy_from_slice(self.token.as_slice());
        out[20..40].copy_from_slice(self.recipient.as_slice());
        out[40..72].copy_from_slice(&self.nonce.to_be_bytes::<32>());
        out[72..].copy_from_slice(&self.amount.to_be_bytes::<32>());
        out
    }
}
