//! Gate configuration

use crate::error::GateError;
use serde::{Deserialize, Serialize};

/// Confidence attached to every speculative proposal
pub const DEFAULT_CONFIDENCE: f64 = 0.42;

/// The single capability string that unlocks execution
pub const EXECUTE_CAPABILITY: &str = "EXECUTE";

/// Configuration shared by the speculator and the gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Confidence placed on proposals
    pub confidence: f64,
    /// Capability that the gate accepts
    pub execute_token: String,
    /// Record gate decisions into a ledger
    pub audit: bool,
}

impl GateConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With proposal confidence
    #[inline]
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// With execution token
    #[inline]
    #[must_use]
    pub fn with_execute_token(mut self, token: impl Into<String>) -> Self {
        self.execute_token = token.into();
        self
    }

    /// With decision auditing
    #[inline]
    #[must_use]
    pub fn with_audit(mut self, audit: bool) -> Self {
        self.audit = audit;
        self
    }

    /// Reject values the gate cannot operate with
    ///
    /// # Errors
    /// [`GateError::InvalidConfidence`] or [`GateError::EmptyExecutionToken`].
    pub fn validate(&self) -> Result<(), GateError> {
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(GateError::InvalidConfidence(self.confidence));
        }
        if self.execute_token.is_empty() {
            return Err(GateError::EmptyExecutionToken);
        }
        Ok(())
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
            execute_token: EXECUTE_CAPABILITY.to_string(),
            audit: false,
        }
    }
}
