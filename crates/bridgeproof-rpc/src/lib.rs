//! # Bridgeproof RPC
//!
//! Fetches state proofs and block headers from an execution client and runs
//! the full unlock proof pipeline on top of `bridgeproof-core`.
//!
//! The network is untrusted: responses are normalized field by field, and
//! the fetched header is re-hashed against the block hash the node reported
//! before anything is assembled.
//!
//! ## Usage
//!
//! ```ignore
//! use bridgeproof_rpc::{generate_unlock_proof, UnlockProofConfig};
//!
//! let config = UnlockProofConfig::from_json(&std::fs::read_to_string("bridge.json")?)?;
//! let payload = generate_unlock_proof(&config, &key, block).await?;
//! ```

pub mod api;
pub mod config;
pub mod fetcher;
pub mod jsonrpc;
pub mod normalize;
pub mod pipeline;
pub mod query;

#[cfg(test)]
mod testing;

pub use config::UnlockProofConfig;
pub use fetcher::StateProofFetcher;
pub use pipeline::{generate_unlock_proof, UnlockProofGenerator};
pub use query::{HttpStateQuery, StateQuery};
