//! Specgate Kernel
//!
//! Separates speculative proposal generation from authorized execution:
//! 1. **Speculation**: turn input into a [`Proposal`], no authority
//! 2. **Gate**: check the presented capability, refuse or forward
//! 3. **Execution**: run the proposal, reachable only through the gate
//!
//! # Quick Start
//!
//! ```rust
//! use specgate_kernel::prelude::*;
//!
//! let proposal = speculate("deploy service X");
//! assert_eq!(proposal.text, "Suggested action based on: deploy service X");
//!
//! let refused = authorize(&proposal, "READ");
//! assert_eq!(refused, Outcome::no_capability());
//!
//! let executed = authorize(&proposal, "EXECUTE");
//! assert_eq!(executed.result(), Some(proposal.text.as_str()));
//! ```

pub mod capability;
pub mod config;
pub mod error;
pub mod gate;
pub mod ledger;
pub mod pipeline;
pub mod speculator;
pub mod types;

// Re-exports
pub use config::*;
pub use error::*;
pub use gate::authorize;
pub use speculator::speculate;
pub use types::*;

/// Common imports
pub mod prelude {
    pub use crate::capability::CapabilityCheck;
    pub use crate::config::{GateConfig, DEFAULT_CONFIDENCE, EXECUTE_CAPABILITY};
    pub use crate::error::GateError;
    pub use crate::gate::{authorize, Effect, Executor, Gate, NoopEffect, Permit};
    pub use crate::ledger::{DecisionLedger, DecisionRecord};
    pub use crate::pipeline::{Pipeline, PipelineRun};
    pub use crate::speculator::{speculate, Speculator, PROPOSAL_PREFIX};
    pub use crate::types::{DecisionId, Outcome, Proposal, RefusalReason, Status};
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
