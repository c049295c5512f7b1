//! Execution Phase
//!
//! The executor only accepts a [`Permit`], which only the gate can issue.
//!
//! # Critical Invariant
//!
//! The executor performs **zero authorization**. The capability check
//! happened at the gate. The executor only:
//! - Applies the side effect
//! - Reports the proposal text as its result

use super::Permit;
use crate::types::{Outcome, Proposal};
use std::sync::Arc;

/// Side effect applied to an authorized proposal
///
/// Implement this trait to define what execution actually does (file
/// writes, network calls, state mutation).
#[cfg_attr(test, mockall::automock)]
pub trait Effect: Send + Sync {
    /// Apply the proposal
    fn apply(&self, proposal: &Proposal);
}

/// Effect that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEffect;

impl Effect for NoopEffect {
    fn apply(&self, _proposal: &Proposal) {}
}

/// Gated executor
pub struct Executor {
    effect: Arc<dyn Effect>,
}

impl Executor {
    /// Create an executor with no real side effect
    #[must_use]
    pub fn new() -> Self {
        Self {
            effect: Arc::new(NoopEffect),
        }
    }

    /// Create with a custom effect
    #[must_use]
    pub fn with_effect(effect: Arc<dyn Effect>) -> Self {
        Self { effect }
    }

    /// Execute an authorized proposal
    ///
    /// Consumes the permit; every execution needs a fresh authorization.
    #[allow(clippy::needless_pass_by_value)]
    pub fn execute(&self, _permit: Permit, proposal: &Proposal) -> Outcome {
        self.effect.apply(proposal);
        tracing::info!(confidence = proposal.confidence, "proposal executed");
        Outcome::Executed {
            result: proposal.text.clone(),
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor").finish_non_exhaustive()
    }
}
