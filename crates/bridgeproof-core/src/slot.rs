//! Storage slot derivation for the bridge's `processed` mapping.
//!
//! Solidity stores `mapping[k]` declared at slot `p` under
//! `keccak256(pad32(k) ++ pad32(p))`. The bridge keys its mapping with
//! `keccak256(abi.encodePacked(token, recipient, nonce, amount))`, so the
//! slot of a transfer is two keccak rounds away from its logical key.

use alloy_primitives::{Address, B256, U256};

use crate::error::UnlockError;
use crate::hash::{keccak256, keccak256_concat};
use crate::types::{LogicalKey, StorageSlotKey};

/// keccak256 of the tightly packed logical key: the mapping key the
/// contract writes when it processes a transfer.
pub fn processed_hash(key: &LogicalKey) -> B256 {
    B256::from(keccak256(&key.packed()))
}

/// Slot of `mapping[mapping_key]` for a mapping declared at `mapping_slot`.
///
/// Key bytes come first, slot bytes second. Swapping them yields a valid
/// looking slot that the contract never writes.
pub fn mapping_slot_key(mapping_key: B256, mapping_slot: U256) -> StorageSlotKey {
    let slot_word = mapping_slot.to_be_bytes::<32>();
    B256::from(keccak256_concat(&[mapping_key.as_slice(), &slot_word]))
}

/// Derive the storage slot holding the processed flag of a transfer.
pub fn derive_slot_key(
    token: Address,
    recipient: Address,
    nonce: U256,
    amount: U256,
    mapping_slot: U256,
) -> StorageSlotKey {
    let key = LogicalKey::new(token, recipient, nonce, amount);
    mapping_slot_key(processed_hash(&key), mapping_slot)
}

/// Same as [`derive_slot_key`] for hex-encoded addresses. Addresses that are
/// not exactly 20 bytes are rejected before anything is hashed.
pub fn derive_slot_key_from_hex(
    token: &str,
    recipient: &str,
    nonce: U256,
    amount: U256,
    mapping_slot: U256,
) -> Result<StorageSlotKey, UnlockError> {
    let token = parse_address(token)?;
    let recipient = parse_address(recipient)?;
    Ok(derive_slot_key(token, recipient, nonce, amount, mapping_slot))
}

/// Parse a hex address with or without `0x` prefix. No checksum validation.
pub fn parse_address(s: &str) -> Result<Address, UnlockError> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(stripped)
        .map_err(|e| UnlockError::invalid_input(format!("address {s:?}: {e}")))?;
    if bytes.len() != 20 {
        return Err(UnlockError::invalid_input(format!(
            "address {s:?}: expected 20 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(Address::from_slice(&bytes))
}
