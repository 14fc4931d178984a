//! End-to-end unlock proof generation.
//!
//! derive slot -> {fetch proof, fetch header} -> encode -> assemble ->
//! serialize. The two fetches run concurrently; the first failure drops the
//! other one, so a partial response never reaches the assembler.

use alloy_primitives::{Address, U256};
use bridgeproof_core::{
    build_record, check_reported_hash, derive_slot_key, serialize, LogicalKey, UnlockError,
    UnlockProofRecord,
};

use crate::config::UnlockProofConfig;
use crate::fetcher::StateProofFetcher;
use crate::query::{HttpStateQuery, StateQuery};

/// Builds unlock proofs for one bridge contract.
pub struct UnlockProofGenerator<Q> {
    fetcher: StateProofFetcher<Q>,
    contract: Address,
    mapping_slot: U256,
    verify_block_hash: bool,
}

impl UnlockProofGenerator<HttpStateQuery> {
    pub fn from_config(config: &UnlockProofConfig) -> Self {
        Self::new(HttpStateQuery::from_config(config), config)
    }
}

impl<Q: StateQuery> UnlockProofGenerator<Q> {
    pub fn new(query: Q, config: &UnlockProofConfig) -> Self {
        Self {
            fetcher: StateProofFetcher::new(query),
            contract: config.contract_address,
            mapping_slot: config.mapping_slot,
            verify_block_hash: config.verify_block_hash,
        }
    }

    /// Assemble the record proving `key` was processed as of `block`.
    pub async fn build(&self, key: &LogicalKey, block: u64) -> Result<UnlockProofRecord, UnlockError> {
        let slot_key = derive_slot_key(
            key.token,
            key.recipient,
            key.nonce,
            key.amount,
            self.mapping_slot,
        );
        tracing::debug!(%slot_key, block, contract = %self.contract, "derived storage slot");

        let (proof, header) = tokio::try_join!(
            self.fetcher.fetch_proof(self.contract, slot_key, block),
            self.fetcher.fetch_header(block),
        )?;

        if self.verify_block_hash {
            if let Err(err) = check_reported_hash(&header) {
                tracing::warn!(block, error = %err, "re-encoded header does not match reported hash");
                return Err(err);
            }
        }

        if proof.storage_value.is_zero() {
            // Still a valid proof, but of absence: the verifier will refuse it
            tracing::warn!(block, %slot_key, "transfer slot is empty at this block");
        }

        build_record(&header, proof)
    }

    /// [`Self::build`] followed by serialization into the transport form.
    pub async fn generate(&self, key: &LogicalKey, block: u64) -> Result<String, UnlockError> {
        let record = self.build(key, block).await?;
        let payload = serialize(&record)?;
        tracing::info!(
            block,
            account_nodes = record.account_proof().len(),
            storage_nodes = record.storage_proof().len(),
            bytes = payload.len(),
            "generated unlock proof"
        );
        Ok(payload)
    }
}

/// Generate the base64 unlock proof for `key` at `block` over HTTP JSON-RPC.
pub async fn generate_unlock_proof(
    config: &UnlockProofConfig,
    key: &LogicalKey,
    block: u64,
) -> Result<String, UnlockError> {
    UnlockProofGenerator::from_config(config).generate(key, block).await
}
