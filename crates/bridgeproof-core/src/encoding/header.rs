use alloy_primitives::B256;
use alloy_rlp::Encodable;

use crate::encoding::rlp::wrap_list;
use crate::error::UnlockError;
use crate::hash::keccak256;
use crate::types::BlockHeaderFields;

/// RLP-encode a block header exactly as the source chain hashed it.
///
/// Fixed-width values (hashes, beneficiary, bloom, nonce) keep their full
/// width; integers are minimal big-endian with zero encoded as the empty
/// string. Fork-dependent tail fields are appended only when present, and
/// the tail must be contiguous: a field may only be present if every field
/// introduced before it is present too.
pub fn encode_header(header: &BlockHeaderFields) -> Result<Vec<u8>, UnlockError> {
    check_tail(header)?;

    let mut payload = Vec::with_capacity(640);
    header.parent_hash.encode(&mut payload);
    header.uncles_hash.encode(&mut payload);
    header.beneficiary.encode(&mut payload);
    header.state_root.encode(&mut payload);
    header.transactions_root.encode(&mut payload);
    header.receipts_root.encode(&mut payload);
    header.logs_bloom.encode(&mut payload);
    header.difficulty.encode(&mut payload);
    header.number.encode(&mut payload);
    header.gas_limit.encode(&mut payload);
    header.gas_used.encode(&mut payload);
    header.timestamp.encode(&mut payload);
    header.extra_data.encode(&mut payload);
    header.mix_hash.encode(&mut payload);
    header.nonce.encode(&mut payload);

    if let Some(base_fee) = header.base_fee_per_gas {
        base_fee.encode(&mut payload);
    }
    if let Some(root) = header.withdrawals_root {
        root.encode(&mut payload);
    }
    if let Some(used) = header.blob_gas_used {
        used.encode(&mut payload);
    }
    if let Some(excess) = header.excess_blob_gas {
        excess.encode(&mut payload);
    }
    if let Some(root) = header.parent_beacon_block_root {
        root.encode(&mut payload);
    }
    if let Some(hash) = header.requests_hash {
        hash.encode(&mut payload);
    }

    Ok(wrap_list(&payload))
}

/// keccak256 of the canonical header encoding, i.e. the block hash.
pub fn header_hash(header: &BlockHeaderFields) -> Result<B256, UnlockError> {
    Ok(B256::from(keccak256(&encode_header(header)?)))
}

/// Re-hash the header and compare against the hash the endpoint reported.
///
/// Returns the computed hash. Headers without a reported hash pass unchecked.
pub fn check_reported_hash(header: &BlockHeaderFields) -> Result<B256, UnlockError> {
    let computed = header_hash(header)?;
    match header.reported_hash {
        Some(reported) if reported != computed => Err(UnlockError::encoding(
            "hash",
            format!(
                "re-encoded header of block {} hashes to {computed}, endpoint reported {reported}",
                header.number
            ),
        )),
        _ => Ok(computed),
    }
}

/// Reject a tail with gaps, e.g. a withdrawals root without a base fee.
fn check_tail(header: &BlockHeaderFields) -> Result<(), UnlockError> {
    let mut missing: Option<&'static str> = None;
    for (field, present) in header.tail_presence() {
        match (present, missing) {
            (false, None) => missing = Some(field),
            (true, Some(absent)) => {
                return Err(UnlockError::encoding(
                    field,
                    format!("present while earlier fork field `{absent}` is absent"),
                ));
            }
            _ => {}
        }
    }
    Ok(())
}
