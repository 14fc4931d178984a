use borsh::{BorshDeserialize, BorshSerialize};

/// The unlock proof handed to the destination chain's light-client verifier.
///
/// Field order and types ARE the wire contract: the verifier decodes exactly
/// `(Vec<u8>, Vec<Vec<u8>>, Vec<u8>, Vec<Vec<u8>>)` in this order. Reordering
/// or retyping a field requires bumping `serializer::SCHEMA_VERSION`.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct UnlockProofRecord {
    header_data: Vec<u8>,
    account_proof: Vec<Vec<u8>>,
    account_data: Vec<u8>,
    storage_proof: Vec<Vec<u8>>,
}

impl UnlockProofRecord {
    /// Build a record without any validation. Use `assembly::assemble` to
    /// get a record that is guaranteed to be accepted by the verifier's schema.
    pub fn new(
        header_data: Vec<u8>,
        account_proof: Vec<Vec<u8>>,
        account_data: Vec<u8>,
        storage_proof: Vec<Vec<u8>>,
    ) -> Self {
        Self {
            header_data,
            account_proof,
            account_data,
            storage_proof,
        }
    }

    /// RLP-encoded block header.
    pub fn header_data(&self) -> &[u8] {
        &self.header_data
    }

    /// Account proof nodes, state root first.
    pub fn account_proof(&self) -> &[Vec<u8>] {
        &self.account_proof
    }

    /// RLP-encoded account leaf value.
    pub fn account_data(&self) -> &[u8] {
        &self.account_data
    }

    /// Storage proof nodes, storage root first.
    pub fn storage_proof(&self) -> &[Vec<u8>] {
        &self.storage_proof
    }

    pub fn into_parts(self) -> (Vec<u8>, Vec<Vec<u8>>, Vec<u8>, Vec<Vec<u8>>) {
        (
            self.header_data,
            self.account_proof,
            self.account_data,
            self.storage_proof,
        )
    }
}
