//! Wire schema of the unlock proof.
//!
//! Schema v1 is the Borsh layout of [`UnlockProofRecord`]: each `Vec` is a
//! little-endian `u32` element count followed by its elements, fields in
//! declaration order. There is no version tag on the wire because the
//! verifier's decoder does not expect one; the version lives here and must
//! move together with any change to the record's fields.
//!
//! The bytes travel inside a larger call payload, so the transport form is
//! standard base64 with padding.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use borsh::BorshDeserialize;

use crate::error::UnlockError;
use crate::types::UnlockProofRecord;

/// Version of the record layout the destination verifier decodes.
pub const SCHEMA_VERSION: u32 = 1;

/// Encode a record into schema v1 bytes.
pub fn to_schema_bytes(record: &UnlockProofRecord) -> Result<Vec<u8>, UnlockError> {
    // Borsh refuses collections longer than u32::MAX
    borsh::to_vec(record).map_err(|e| UnlockError::schema(e.to_string()))
}

/// Decode schema v1 bytes. The whole input must be consumed.
pub fn from_schema_bytes(bytes: &[u8]) -> Result<UnlockProofRecord, UnlockError> {
    UnlockProofRecord::try_from_slice(bytes).map_err(|e| UnlockError::schema(e.to_string()))
}

/// Encode a record into its transport form: base64 of the schema bytes.
pub fn serialize(record: &UnlockProofRecord) -> Result<String, UnlockError> {
    let bytes = to_schema_bytes(record)?;
    Ok(BASE64.encode(bytes))
}

/// Inverse of [`serialize`].
pub fn deserialize(transport: &str) -> Result<UnlockProofRecord, UnlockError> {
    let bytes = BASE64
        .decode(transport.trim())
        .map_err(|e| UnlockError::invalid_input(format!("transport payload is not base64: {e}")))?;
    from_schema_bytes(&bytes)
}
