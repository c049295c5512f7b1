//! Authority Gate
//!
//! The single enforcement point between speculation and execution.
//!
//! The gate owns its [`Executor`] and is the only code that can issue a
//! [`Permit`]. Since [`Executor::execute`] requires a permit, there is no
//! path to execution that skips the capability check.
//!
//! On refusal the gate returns immediately: the executor and its effect are
//! never touched and nothing is retried.

pub mod executor;

pub use executor::{Effect, Executor, NoopEffect};

use crate::capability::CapabilityCheck;
use crate::config::GateConfig;
use crate::error::GateError;
use crate::ledger::DecisionLedger;
use crate::types::{Outcome, Proposal, RefusalReason};

/// Proof that a capability check passed.
///
/// Only the gate can issue one; it is neither `Clone` nor `Copy`, and the
/// executor consumes it.
#[derive(Debug)]
#[must_use]
pub struct Permit {
    _sealed: (),
}

impl Permit {
    fn issue() -> Self {
        Self { _sealed: () }
    }
}

/// Capability gate in front of the executor
#[derive(Debug)]
pub struct Gate {
    check: CapabilityCheck,
    executor: Executor,
    ledger: Option<DecisionLedger>,
}

impl Gate {
    /// Gate accepting `EXECUTE`, with a no-op executor and no ledger
    #[must_use]
    pub fn new() -> Self {
        Self {
            check: CapabilityCheck::default(),
            executor: Executor::new(),
            ledger: None,
        }
    }

    /// Build a gate from validated configuration
    ///
    /// # Errors
    /// Returns the config validation error.
    pub fn from_config(config: &GateConfig) -> Result<Self, GateError> {
        config.validate()?;
        let ledger = config.audit.then(DecisionLedger::new);
        Ok(Self {
            check: CapabilityCheck::new(config.execute_token.clone()),
            executor: Executor::new(),
            ledger,
        })
    }

    /// Replace the executor
    #[must_use]
    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    /// Decision ledger owned by this gate, when auditing is enabled.
    ///
    /// Read-only outside the crate: only the gate appends to it.
    #[must_use]
    pub fn ledger(&self) -> Option<&DecisionLedger> {
        self.ledger.as_ref()
    }

    /// Authorize and, if permitted, execute `proposal`.
    ///
    /// Returns `REFUSED / NO_CAPABILITY` unless `capability` equals the
    /// execution token exactly; otherwise returns the executor's outcome
    /// unchanged.
    pub fn authorize(&self, proposal: &Proposal, capability: &str) -> Outcome {
        let outcome = if self.check.permits(capability) {
            self.executor.execute(Permit::issue(), proposal)
        } else {
            tracing::warn!(reason = %RefusalReason::NoCapability, "execution refused");
            Outcome::no_capability()
        };

        if let Some(ledger) = &self.ledger {
            let id = ledger.record(proposal, outcome.status());
            tracing::debug!(decision_id = %id, status = %outcome.status(), "decision recorded");
        }
        outcome
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

/// Authorize with the default gate
pub fn authorize(proposal: &Proposal, capability: &str) -> Outcome {
    Gate::new().authorize(proposal, capability)
}
