//! Retrieval of the two inputs of an unlock proof.
//!
//! The fetcher asks for exactly one slot at exactly one block and hands back
//! normalized values. It does not retry and does not check that the proof
//! and the header agree; a mismatch there surfaces as a proof the verifier
//! rejects, which is the verifier's job to detect.

use alloy_primitives::Address;
use bridgeproof_core::{BlockHeaderFields, RawProofResponse, StorageSlotKey, UnlockError};

use crate::query::StateQuery;

pub struct StateProofFetcher<Q> {
    query: Q,
}

impl<Q: StateQuery> StateProofFetcher<Q> {
    pub fn new(query: Q) -> Self {
        Self { query }
    }

    /// Account and storage proof of `slot_key` in `contract` at `block`.
    pub async fn fetch_proof(
        &self,
        contract: Address,
        slot_key: StorageSlotKey,
        block: u64,
    ) -> Result<RawProofResponse, UnlockError> {
        let response = self.query.get_proof(contract, &[slot_key], block).await?;
        let proof = response.to_raw_proof(block)?;

        if proof.account_proof.is_empty() {
            return Err(UnlockError::ProofUnavailable {
                block,
                reason: format!("empty account proof for {contract}"),
            });
        }
        tracing::debug!(
            block,
            %contract,
            %slot_key,
            account_nodes = proof.account_proof.len(),
            storage_nodes = proof.storage_proof.len(),
            "fetched state proof"
        );
        Ok(proof)
    }

    /// Header fields of `block`, normalized and ready to encode.
    pub async fn fetch_header(&self, block: u64) -> Result<BlockHeaderFields, UnlockError> {
        let response = self
            .query
            .get_block(block)
            .await?
            .ok_or(UnlockError::BlockNotFound { block })?;
        let header = response.to_header_fields()?;

        if header.number != block {
            return Err(UnlockError::encoding(
                "number",
                format!("requested block {block}, endpoint returned {}", header.number),
            ));
        }
        tracing::debug!(block, fork = ?header.fork(), "fetched header");
        Ok(header)
    }
}
