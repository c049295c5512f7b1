//! Testing utilities for the specgate workspace
//!
//! Shared fixtures and an effect spy for integration tests.

#![allow(missing_docs)]

use parking_lot::Mutex;
use specgate_kernel::gate::{Effect, Executor, Gate};
use specgate_kernel::{speculate, Proposal};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const DEPLOY_INPUT: &str = "deploy service X";
pub const DEPLOY_PROPOSAL_TEXT: &str = "Suggested action based on: deploy service X";

/// Effect that counts and remembers every proposal it is applied to
#[derive(Debug, Default)]
pub struct CountingEffect {
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl CountingEffect {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().clone()
    }
}

impl Effect for CountingEffect {
    fn apply(&self, proposal: &Proposal) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push(proposal.text.clone());
    }
}

pub fn deploy_proposal() -> Proposal {
    speculate(DEPLOY_INPUT)
}

/// Default gate whose executor reports into `effect`
pub fn spied_gate(effect: &Arc<CountingEffect>) -> Gate {
    Gate::new().with_executor(Executor::with_effect(effect.clone()))
}
