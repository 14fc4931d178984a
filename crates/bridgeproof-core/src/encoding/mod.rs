//! Canonical RLP encodings of headers and accounts.
//!
//! A verifier recomputes the block hash from `header_data` and the state-trie
//! leaf from `account_data`. A single byte of deviation does not yield a
//! wrong answer, it yields a proof that can never verify.

pub mod account;
pub mod header;
pub mod rlp;

pub use account::*;
pub use header::*;
