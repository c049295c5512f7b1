//! Speculate → authorize → execute in one call.

use crate::config::GateConfig;
use crate::error::GateError;
use crate::gate::{Executor, Gate};
use crate::ledger::DecisionLedger;
use crate::speculator::Speculator;
use crate::types::{Outcome, Proposal};
use serde::{Deserialize, Serialize};

/// Proposal and outcome of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRun {
    /// Proposal produced by the speculator
    pub proposal: Proposal,
    /// Gate decision for that proposal
    pub outcome: Outcome,
}

/// Speculator and gate built from one configuration
#[derive(Debug)]
pub struct Pipeline {
    speculator: Speculator,
    gate: Gate,
}

impl Pipeline {
    /// Build a pipeline from validated configuration
    ///
    /// # Errors
    /// Returns the config validation error.
    pub fn new(config: &GateConfig) -> Result<Self, GateError> {
        Ok(Self {
            speculator: Speculator::from_config(config)?,
            gate: Gate::from_config(config)?,
        })
    }

    /// Replace the gate's executor
    #[must_use]
    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.gate = self.gate.with_executor(executor);
        self
    }

    /// Speculator used by [`run`](Self::run)
    #[must_use]
    pub fn speculator(&self) -> &Speculator {
        &self.speculator
    }

    /// Gate used by [`run`](Self::run)
    #[must_use]
    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    /// Decision ledger, when auditing is enabled
    #[must_use]
    pub fn ledger(&self) -> Option<&DecisionLedger> {
        self.gate.ledger()
    }

    /// Run `input` through the pipeline with the presented capability
    pub fn run(&self, input: &str, capability: &str) -> PipelineRun {
        let proposal = self.speculator.speculate(input);
        let outcome = self.gate.authorize(&proposal, capability);
        PipelineRun { proposal, outcome }
    }
}
