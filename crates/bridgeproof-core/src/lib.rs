//! # Bridgeproof Core
//!
//! Pure Rust construction of cross-chain unlock proofs.
//!
//! This crate contains **no networking code**. Given an Ethereum block header
//! and an `eth_getProof` response it produces the exact bytes a destination
//! light client needs to check that a bridge transfer was processed: the
//! RLP-encoded header, the RLP-encoded bridge account, and the two
//! Merkle-Patricia proof paths linking them.
//!
//! ## Pipeline
//!
//! - **Slot derivation** (`slot` module): maps a transfer's logical key to
//!   the storage slot of the bridge's processed-transfers mapping.
//! - **Canonical encoding** (`encoding` module): header and account RLP,
//!   byte-exact with what the source chain hashed.
//! - **Assembly and serialization** (`assembly`, `serializer`): the four-part
//!   record and its schema v1 wire form.
//! - **Pre-flight verification** (`verify` module): walks the proof paths
//!   locally before the record is submitted anywhere.
//!
//! ## Usage
//!
//! ```ignore
//! use bridgeproof_core::{build_record, derive_slot_key, serialize};
//! ```

pub mod assembly;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod serializer;
pub mod slot;
pub mod types;
pub mod verify;

// Re-export commonly used types for convenience
pub use assembly::{assemble, build_record};
pub use encoding::{
    check_reported_hash, decode_account, encode_account, encode_header, header_hash,
};
pub use error::UnlockError;
pub use hash::keccak256;
pub use serializer::{deserialize, serialize, SCHEMA_VERSION};
pub use slot::{derive_slot_key, derive_slot_key_from_hex, parse_address};
pub use types::*;
pub use verify::{verify_unlock_proof, ProofError, VerifiedUnlock};
