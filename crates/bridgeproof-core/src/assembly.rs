//! Composition of the unlock proof record.
//!
//! Nothing here transforms data: the encoded header and account and the
//! untouched proof node sequences are placed into the record in the order the
//! verifier walks them. Only the shape of the inputs is checked.

use crate::encoding::{decode_account, encode_account, encode_header, rlp::decode_list};
use crate::error::UnlockError;
use crate::types::{BlockHeaderFields, HeaderFork, RawProofResponse, UnlockProofRecord};

/// Header list positions that must hold 32-byte hashes: parent, uncles,
/// state root, transactions root, receipts root, mix hash.
const HEADER_HASH_POSITIONS: [usize; 6] = [0, 1, 3, 4, 5, 13];

/// Combine already-encoded parts into an [`UnlockProofRecord`].
pub fn assemble(
    header_data: Vec<u8>,
    account_proof: Vec<Vec<u8>>,
    account_data: Vec<u8>,
    storage_proof: Vec<Vec<u8>>,
) -> Result<UnlockProofRecord, UnlockError> {
    check_nodes("account_proof", &account_proof)?;
    check_nodes("storage_proof", &storage_proof)?;
    check_header(&header_data)?;
    decode_account(&account_data)
        .map_err(|e| UnlockError::invalid_input(format!("account_data: {e}")))?;

    Ok(UnlockProofRecord::new(
        header_data,
        account_proof,
        account_data,
        storage_proof,
    ))
}

/// Encode a header and a fetched proof, then assemble them.
pub fn build_record(
    header: &BlockHeaderFields,
    proof: RawProofResponse,
) -> Result<UnlockProofRecord, UnlockError> {
    let header_data = encode_header(header)?;
    let account_data = encode_account(&proof.account);
    assemble(
        header_data,
        proof.account_proof,
        account_data,
        proof.storage_proof,
    )
}

fn check_nodes(name: &str, nodes: &[Vec<u8>]) -> Result<(), UnlockError> {
    if nodes.is_empty() {
        // The verifier walks at least the root node; an empty sequence
        // cannot be expressed as a proof.
        return Err(UnlockError::schema(format!("{name} has no nodes")));
    }
    if let Some(index) = nodes.iter().position(|node| node.is_empty()) {
        return Err(UnlockError::invalid_input(format!(
            "{name} node {index} is empty"
        )));
    }
    Ok(())
}

fn check_header(header_data: &[u8]) -> Result<(), UnlockError> {
    let items = decode_list(header_data)
        .map_err(|e| UnlockError::invalid_input(format!("header_data: {e}")))?;

    let min = HeaderFork::Frontier.field_count();
    let max = HeaderFork::Prague.field_count();
    if items.len() < min || items.len() > max {
        return Err(UnlockError::invalid_input(format!(
            "header_data has {} fields, expected {min}..={max}",
            items.len()
        )));
    }
    for position in HEADER_HASH_POSITIONS {
        if items[position].len() != 32 {
            return Err(UnlockError::invalid_input(format!(
                "header_data field {position} is {} bytes, expected a 32-byte hash",
                items[position].len()
            )));
        }
    }
    Ok(())
}
