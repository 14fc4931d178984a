use alloy_primitives::{b256, Address, B256, U256};
use serde::{Deserialize, Serialize};

use super::key::StorageSlotKey;

/// An account as stored in the source chain's state trie.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    /// Number of transactions sent from this account.
    pub nonce: u64,
    /// Balance in wei.
    pub balance: U256,
    /// Root hash of the account's storage trie.
    /// For externally owned accounts (EOAs), this is the empty trie root.
    pub storage_root: B256,
    /// Keccak256 hash of the account's code.
    /// For EOAs, this is the hash of the empty string.
    pub code_hash: B256,
}

impl AccountState {
    /// The keccak256 hash of empty bytes, the code hash of EOAs.
    pub const EMPTY_CODE_HASH: B256 =
        b256!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");

    /// The root of an empty Merkle-Patricia trie.
    pub const EMPTY_STORAGE_ROOT: B256 =
        b256!("56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421");

    /// Check if this is a contract account (has code deployed).
    pub fn is_contract(&self) -> bool {
        self.code_hash != Self::EMPTY_CODE_HASH
    }

    /// Check if this account has a non-empty storage trie.
    pub fn has_storage(&self) -> bool {
        self.storage_root != Self::EMPTY_STORAGE_ROOT
    }
}

/// Account and storage proof for a single slot, as returned by the state
/// query interface after normalization. Proof nodes are raw RLP trie nodes
/// in root-to-leaf order and are never altered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProofResponse {
    /// The account the proof was requested for.
    pub address: Address,
    /// Account proof nodes, state root first.
    pub account_proof: Vec<Vec<u8>>,
    /// The account fields reported alongside the proof.
    pub account: AccountState,
    /// The storage slot the storage proof covers.
    pub storage_key: StorageSlotKey,
    /// The value reported for that slot.
    pub storage_value: U256,
    /// Storage proof nodes, storage root first.
    pub storage_proof: Vec<Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keccak256;

    #[test]
    fn test_empty_constants() {
        assert_eq!(keccak256(&[]), AccountState::EMPTY_CODE_HASH.0);
        // RLP of the empty string is 0x80
        assert_eq!(keccak256(&[0x80]), AccountState::EMPTY_STORAGE_ROOT.0);
    }

    #[test]
    fn test_contract_detection() {
        let eoa = AccountState {
            nonce: 3,
            balance: U256::from(100u64),
            storage_root: AccountState::EMPTY_STORAGE_ROOT,
            code_hash: AccountState::EMPTY_CODE_HASH,
        };
        assert!(!eoa.is_contract());
        assert!(!eoa.has_storage());

        let contract = AccountState {
            code_hash: B256::repeat_byte(0x11),
            storage_root: B256::repeat_byte(0x22),
            ..eoa
        };
        assert!(contract.is_contract());
        assert!(contract.has_storage());
    }
}
