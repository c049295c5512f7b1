//! Core records exchanged between the speculator, gate and executor.
//!
//! Both records are plain data: they carry no authority and are never
//! mutated after construction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Speculative suggestion produced without side effects.
///
/// Serializes as `{"proposal": "...", "confidence": 0.42}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    /// Suggested action text
    #[serde(rename = "proposal")]
    pub text: String,
    /// Score in `[0, 1]`
    pub confidence: f64,
}

impl Proposal {
    /// Create a proposal record
    #[inline]
    #[must_use]
    pub fn new(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// Terminal status of a gate decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Capability check failed; nothing ran
    Refused,
    /// Capability check passed and the executor ran
    Executed,
}

impl Status {
    /// Wire name of the status
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Refused => "REFUSED",
            Status::Executed => "EXECUTED",
        }
    }

    pub(crate) fn as_u8(self) -> u8 {
        match self {
            Status::Refused => 0,
            Status::Executed => 1,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the gate refused a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefusalReason {
    /// The presented capability did not match the execution token
    NoCapability,
}

impl RefusalReason {
    /// Wire name of the reason
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RefusalReason::NoCapability => "NO_CAPABILITY",
        }
    }
}

impl std::fmt::Display for RefusalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal result of a pipeline run.
///
/// Serializes as `{"status": "REFUSED", "reason": "NO_CAPABILITY"}` or
/// `{"status": "EXECUTED", "result": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// Refused at the gate
    Refused {
        /// Refusal reason
        reason: RefusalReason,
    },
    /// Executed after passing the gate
    Executed {
        /// Executor result
        result: String,
    },
}

impl Outcome {
    /// Refusal for a missing or wrong capability
    #[inline]
    #[must_use]
    pub fn no_capability() -> Self {
        Outcome::Refused {
            reason: RefusalReason::NoCapability,
        }
    }

    /// Status of this outcome
    #[must_use]
    pub fn status(&self) -> Status {
        match self {
            Outcome::Refused { .. } => Status::Refused,
            Outcome::Executed { .. } => Status::Executed,
        }
    }

    /// True if the executor ran
    #[inline]
    #[must_use]
    pub fn is_executed(&self) -> bool {
        matches!(self, Outcome::Executed { .. })
    }

    /// Refusal reason, if refused
    #[must_use]
    pub fn reason(&self) -> Option<RefusalReason> {
        match self {
            Outcome::Refused { reason } => Some(*reason),
            Outcome::Executed { .. } => None,
        }
    }

    /// Executor result, if executed
    #[must_use]
    pub fn result(&self) -> Option<&str> {
        match self {
            Outcome::Refused { .. } => None,
            Outcome::Executed { result } => Some(result),
        }
    }
}

/// Identifier of a recorded gate decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DecisionId(pub Uuid);

impl DecisionId {
    /// Generate a fresh identifier
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DecisionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DecisionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
