//! Error types for the speculation gate
//!
//! A refused capability is NOT an error: it is returned as
//! [`Outcome::Refused`](crate::types::Outcome::Refused). These errors cover
//! configuration and ledger bookkeeping only.

/// Main gate error type
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// Confidence outside `[0, 1]` or not finite
    #[error("invalid confidence {0}: must be a finite value in [0, 1]")]
    InvalidConfidence(f64),

    /// Execution token is empty
    #[error("execution token must not be empty")]
    EmptyExecutionToken,

    /// Ledger hash chain broken
    #[error("ledger integrity violation at record {index}")]
    LedgerIntegrity {
        /// Index of the first bad record
        index: usize,
    },

    /// Proposal record could not be decoded
    #[error("malformed proposal: {0}")]
    MalformedProposal(#[from] serde_json::Error),
}

impl GateError {
    /// Check if error comes from configuration
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfidence(_) | Self::EmptyExecutionToken
        )
    }

    /// Check if error indicates tampering
    #[inline]
    #[must_use]
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::LedgerIntegrity { .. })
    }
}
