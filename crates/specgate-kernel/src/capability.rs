//! Capability check
//!
//! The capability is a literal string compared for exact equality against
//! the configured execution token. No trimming, case folding or prefix
//! matching is applied.

use crate::config::EXECUTE_CAPABILITY;

/// Matches presented capabilities against the execution token
#[derive(Clone, PartialEq, Eq)]
pub struct CapabilityCheck {
    token: String,
}

impl CapabilityCheck {
    /// Check against the given token
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// True only if `presented` equals the execution token exactly
    #[inline]
    #[must_use]
    pub fn permits(&self, presented: &str) -> bool {
        self.token == presented
    }
}

impl Default for CapabilityCheck {
    fn default() -> Self {
        Self::new(EXECUTE_CAPABILITY)
    }
}

// Token is redacted so it never lands in logs.
impl std::fmt::Debug for CapabilityCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityCheck")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_token_passes() {
        assert!(CapabilityCheck::default().permits("EXECUTE"));
    }

    #[test]
    fn near_misses_fail() {
        let check = CapabilityCheck::default();
        for presented in ["", "READ", "execute", "EXECUTE ", " EXECUTE", "EXECUTED", "EXEC"] {
            assert!(!check.permits(presented), "{presented:?} must not pass");
        }
    }

    #[test]
    fn custom_token() {
        let check = CapabilityCheck::new("deploy-ok");
        assert!(check.permits("deploy-ok"));
        assert!(!check.permits("EXECUTE"));
    }

    #[test]
    fn debug_redacts_token() {
        let rendered = format!("{:?}", CapabilityCheck::new("secret"));
        assert!(!rendered.contains("secret"));
    }
}
