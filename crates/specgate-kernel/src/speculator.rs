//! Speculation Phase
//!
//! Turns free-form input into a [`Proposal`]. The speculator holds no
//! execution authority: it cannot mint a [`Permit`](crate::gate::Permit), so
//! nothing here can reach the executor.

use crate::config::{GateConfig, DEFAULT_CONFIDENCE};
use crate::error::GateError;
use crate::types::Proposal;

/// Prefix placed before the input in every proposal
pub const PROPOSAL_PREFIX: &str = "Suggested action based on: ";

/// Authority-free proposal generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speculator {
    confidence: f64,
}

impl Speculator {
    /// Create a speculator with the default confidence
    #[must_use]
    pub fn new() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
        }
    }

    /// Create a speculator from validated configuration
    ///
    /// # Errors
    /// Returns the config validation error.
    pub fn from_config(config: &GateConfig) -> Result<Self, GateError> {
        config.validate()?;
        Ok(Self {
            confidence: config.confidence,
        })
    }

    /// Confidence attached to proposals
    #[inline]
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Produce a proposal for `input`. Accepts any input, including empty.
    #[must_use]
    pub fn speculate(&self, input: &str) -> Proposal {
        tracing::debug!(input_len = input.len(), "speculating");
        Proposal::new(format!("{PROPOSAL_PREFIX}{input}"), self.confidence)
    }
}

impl Default for Speculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Speculate with the default configuration
#[must_use]
pub fn speculate(input: &str) -> Proposal {
    Speculator::new().speculate(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn deploy_scenario() {
        let p = speculate("deploy service X");
        assert_eq!(p, Proposal::new("Suggested action based on: deploy service X", 0.42));
    }

    #[test]
    fn empty_input_is_allowed() {
        let p = speculate("");
        assert_eq!(p.text, "Suggested action based on: ");
    }

    #[test]
    fn configured_confidence_is_used() {
        let config = GateConfig::new().with_confidence(0.9);
        let speculator = Speculator::from_config(&config).unwrap();
        assert_eq!(speculator.speculate("x").confidence, 0.9);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GateConfig::new().with_confidence(2.0);
        assert!(Speculator::from_config(&config).is_err());
    }

    proptest! {
        #[test]
        fn prop_proposal_contains_input(input in ".*") {
            let p = speculate(&input);
            prop_assert!(p.text.contains(&input));
            prop_assert!(p.text.starts_with(PROPOSAL_PREFIX));
            prop_assert_eq!(p.confidence, DEFAULT_CONFIDENCE);
        }

        #[test]
        fn prop_speculate_is_idempotent(input in ".*") {
            prop_assert_eq!(speculate(&input), speculate(&input));
        }
    }
}
