use thiserror::Error;

/// Errors that abort an unlock proof generation call.
///
/// `InvalidInput`, `EncodingMismatch` and `SchemaVersionMismatch` are caller
/// errors and are raised before any partial output exists. The remaining
/// variants come from the environment (the state query endpoint) and are
/// surfaced as-is; retrying them is the caller's decision.
#[derive(Debug, Error)]
pub enum UnlockError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Cannot produce canonical form of field `{field}`: {reason}")]
    EncodingMismatch { field: String, reason: String },

    #[error("Proof unavailable at block {block}: {reason}")]
    ProofUnavailable { block: u64, reason: String },

    #[error("Block {block} not found")]
    BlockNotFound { block: u64 },

    #[error("Network failure talking to state query endpoint: {reason}")]
    NetworkFailure { reason: String },

    #[error("State query endpoint returned error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Record not representable in proof schema v{version}: {reason}")]
    SchemaVersionMismatch { version: u32, reason: String },
}

impl UnlockError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn encoding(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EncodingMismatch {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn schema(reason: impl Into<String>) -> Self {
        Self::SchemaVersionMismatch {
            version: crate::serializer::SCHEMA_VERSION,
            reason: reason.into(),
        }
    }

    /// Whether the failure came from the state query endpoint rather than
    /// from the caller's inputs. Only these are worth retrying.
    pub fn is_environmental(&self) -> bool {
        matches!(
            self,
            Self::ProofUnavailable { .. }
                | Self::BlockNotFound { .. }
                | Self::NetworkFailure { .. }
                | Self::Rpc { .. }
        )
    }
}
