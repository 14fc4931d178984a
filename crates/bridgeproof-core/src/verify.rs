//! Local pre-flight check of an assembled unlock proof.
//!
//! The destination light client is the only party whose verdict matters, but
//! submitting a proof costs a transaction. This module walks the same
//! Merkle-Patricia paths the verifier walks so a caller can catch a broken
//! proof before paying for it. It trusts nothing in the record: the state
//! root comes out of `header_data`, the storage root out of the proven
//! account leaf.

use alloy_primitives::{Address, B256, U256};
use thiserror::Error;

use crate::encoding::{
    decode_account,
    rlp::{decode_bytes, decode_list},
};
use crate::hash::keccak256;
use crate::types::{AccountState, StorageSlotKey, UnlockProofRecord};

/// Errors during Merkle-Patricia trie proof verification.
/// Each variant is specific enough to diagnose exactly what went wrong.
#[derive(Debug, Error)]
pub enum ProofError {
    #[error("Empty proof: no trie nodes provided")]
    EmptyProof,

    #[error("Invalid RLP encoding in proof node {index}: {reason}")]
    InvalidRlp { index: usize, reason: String },

    #[error("Proof verification failed: computed root {computed} does not match expected root {expected}")]
    RootMismatch { computed: B256, expected: B256 },

    #[error("Invalid trie node type at depth {depth}: expected branch, extension or leaf, got {node_type}")]
    InvalidNodeType { depth: usize, node_type: String },

    #[error("Proof path incomplete: trie traversal ended at depth {depth} without reaching the key")]
    IncompleteProof { depth: usize },

    #[error("Account {address} not present in the state trie")]
    AccountNotFound { address: Address },

    #[error("Invalid header encoding: {reason}")]
    InvalidHeader { reason: String },

    #[error("Invalid account RLP encoding: {reason}")]
    InvalidAccountEncoding { reason: String },

    #[error("Proven account leaf differs from account_data")]
    AccountDataMismatch,

    #[error("Invalid value encoding: {reason}")]
    InvalidValueEncoding { reason: String },
}

/// What a structurally valid unlock proof proves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedUnlock {
    /// keccak256 of `header_data`.
    pub block_hash: B256,
    pub block_number: u64,
    pub state_root: B256,
    pub account: AccountState,
    pub storage_key: StorageSlotKey,
    /// Zero when the proof shows the slot is absent.
    pub storage_value: U256,
}

impl VerifiedUnlock {
    /// The bridge writes a non-zero value once a transfer is processed.
    pub fn is_processed(&self) -> bool {
        !self.storage_value.is_zero()
    }
}

/// Check every hash link of an unlock proof for `contract` / `slot_key`.
pub fn verify_unlock_proof(
    record: &UnlockProofRecord,
    contract: Address,
    slot_key: StorageSlotKey,
) -> Result<VerifiedUnlock, ProofError> {
    let (state_root, block_number) = decode_header_summary(record.header_data())?;

    let leaf = verify_account_leaf(state_root, contract, record.account_proof())?;
    if leaf != record.account_data() {
        return Err(ProofError::AccountDataMismatch);
    }
    let account = decode_account(leaf).map_err(|e| ProofError::InvalidAccountEncoding {
        reason: e.to_string(),
    })?;

    let storage_value = verify_storage_proof(account.storage_root, slot_key, record.storage_proof())?;

    Ok(VerifiedUnlock {
        block_hash: B256::from(keccak256(record.header_data())),
        block_number,
        state_root,
        account,
        storage_key: slot_key,
        storage_value,
    })
}

/// Verify an account proof against a known state root and decode the account.
pub fn verify_account_proof(
    state_root: B256,
    address: Address,
    proof: &[Vec<u8>],
) -> Result<AccountState, ProofError> {
    let leaf = verify_account_leaf(state_root, address, proof)?;
    decode_account(leaf).map_err(|e| ProofError::InvalidAccountEncoding {
        reason: e.to_string(),
    })
}

/// Verify a storage proof for a specific storage slot of a contract.
/// The storage root comes from a verified account state.
pub fn verify_storage_proof(
    storage_root: B256,
    slot: StorageSlotKey,
    proof: &[Vec<u8>],
) -> Result<U256, ProofError> {
    if proof.is_empty() {
        // Empty proof with empty storage root means the slot is zero
        if storage_root == AccountState::EMPTY_STORAGE_ROOT {
            return Ok(U256::ZERO);
        }
        return Err(ProofError::EmptyProof);
    }

    // The key in the storage trie is keccak256(slot)
    let key = keccak256(slot.as_slice());

    match verify_merkle_patricia_proof(storage_root, &key, proof)? {
        Some(rlp_value) => decode_storage_value(rlp_value),
        // Slot not in trie: value is zero (valid proof of non-existence)
        None => Ok(U256::ZERO),
    }
}

fn verify_account_leaf<'a>(
    state_root: B256,
    address: Address,
    proof: &'a [Vec<u8>],
) -> Result<&'a [u8], ProofError> {
    if proof.is_empty() {
        return Err(ProofError::EmptyProof);
    }

    // The key in the state trie is keccak256(address)
    let key = keccak256(address.as_slice());

    verify_merkle_patricia_proof(state_root, &key, proof)?
        .ok_or(ProofError::AccountNotFound { address })
}

/// Pull the state root and block number out of an encoded header.
fn decode_header_summary(header_data: &[u8]) -> Result<(B256, u64), ProofError> {
    let items = decode_list(header_data).map_err(|e| ProofError::InvalidHeader {
        reason: e.to_string(),
    })?;
    if items.len() < 15 {
        return Err(ProofError::InvalidHeader {
            reason: format!("expected at least 15 fields, got {}", items.len()),
        });
    }
    if items[3].len() != 32 {
        return Err(ProofError::InvalidHeader {
            reason: format!("state root is {} bytes", items[3].len()),
        });
    }
    if items[8].len() > 8 {
        return Err(ProofError::InvalidHeader {
            reason: format!("block number is {} bytes", items[8].len()),
        });
    }
    let number = items[8]
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | byte as u64);
    Ok((B256::from_slice(items[3]), number))
}

/// Core Merkle-Patricia trie proof verification.
///
/// Walks the trie from root to leaf following the proof nodes.
/// At each step, verifies that the hash of the current node matches
/// what the parent node claims. Children shorter than 32 bytes are embedded
/// in their parent instead of hashed and are walked in place; they do not
/// occupy a proof entry of their own.
///
/// Returns Some(value) if the key exists, None for proof of non-existence.
fn verify_merkle_patricia_proof<'a>(
    expected_root: B256,
    key: &[u8; 32],
    proof_nodes: &'a [Vec<u8>],
) -> Result<Option<&'a [u8]>, ProofError> {
    let Some(root) = proof_nodes.first() else {
        return Err(ProofError::EmptyProof);
    };

    // The root is always referenced by hash, however short it is
    let root_hash = B256::from(keccak256(root));
    if root_hash != expected_root {
        return Err(ProofError::RootMismatch {
            computed: root_hash,
            expected: expected_root,
        });
    }

    let nibbles = bytes_to_nibbles(key);
    let mut nibble_index: usize = 0;
    let mut index: usize = 0;
    let mut node: &'a [u8] = root;
    let mut depth: usize = 0;

    loop {
        let items = decode_list(node).map_err(|e| ProofError::InvalidRlp {
            index,
            reason: e.to_string(),
        })?;

        let child_ref = match items.len() {
            17 => {
                // Branch node: 16 children + value
                if nibble_index >= nibbles.len() {
                    let value = items[16];
                    return Ok((!value.is_empty()).then_some(value));
                }
                let child = items[nibbles[nibble_index] as usize];
                nibble_index += 1;
                if child.is_empty() {
                    return Ok(None);
                }
                child
            }
            2 => {
                let (path, is_leaf) = decode_compact_path(items[0]);
                let remaining = &nibbles[nibble_index..];

                if is_leaf {
                    // Key doesn't match: proof of non-existence
                    if remaining != path.as_slice() || items[1].is_empty() {
                        return Ok(None);
                    }
                    return Ok(Some(items[1]));
                }

                // Extension node: consume the shared prefix
                if !remaining.starts_with(&path) {
                    return Ok(None);
                }
                nibble_index += path.len();
                items[1]
            }
            other => {
                return Err(ProofError::InvalidNodeType {
                    depth,
                    node_type: format!("{other}-element list"),
                });
            }
        };

        depth += 1;

        if child_ref.len() < 32 {
            // Embedded node: walk it in place, it has no proof entry
            node = child_ref;
            continue;
        }
        if child_ref.len() > 32 {
            return Err(ProofError::InvalidRlp {
                index,
                reason: format!("child reference is {} bytes", child_ref.len()),
            });
        }

        index += 1;
        let Some(next) = proof_nodes.get(index) else {
            // Last node in proof, and the path continues below it
            return Err(ProofError::IncompleteProof { depth });
        };
        let next_hash = B256::from(keccak256(next));
        let expected = B256::from_slice(child_ref);
        if next_hash != expected {
            return Err(ProofError::RootMismatch {
                computed: next_hash,
                expected,
            });
        }
        node = next;
    }
}

/// Decode a storage value from RLP.
fn decode_storage_value(rlp_bytes: &[u8]) -> Result<U256, ProofError> {
    let value = decode_bytes(rlp_bytes).map_err(|e| ProofError::InvalidValueEncoding {
        reason: e.to_string(),
    })?;
    if value.len() > 32 {
        return Err(ProofError::InvalidValueEncoding {
            reason: format!("Storage value too long: {} bytes", value.len()),
        });
    }
    Ok(U256::from_be_slice(value))
}

/// Convert a 32-byte array to nibbles (4 bits each).
fn bytes_to_nibbles(bytes: &[u8; 32]) -> Vec<u8> {
    let mut nibbles = Vec::with_capacity(64);
    for byte in bytes {
        nibbles.push(byte >> 4);
        nibbles.push(byte & 0x0F);
    }
    nibbles
}

/// Decode compact (hex-prefix) encoding used in trie nodes.
/// Returns (nibbles, is_leaf).
fn decode_compact_path(encoded: &[u8]) -> (Vec<u8>, bool) {
    let Some((&first, rest)) = encoded.split_first() else {
        return (vec![], false);
    };

    let flag = first >> 4;
    let is_leaf = flag >= 2;
    let is_odd = flag % 2 == 1;

    let mut nibbles = Vec::with_capacity(1 + rest.len() * 2);
    if is_odd {
        nibbles.push(first & 0x0F);
    }
    for &byte in rest {
        nibbles.push(byte >> 4);
        nibbles.push(byte & 0x0F);
    }

    (nibbles, is_leaf)
}
