//! In-memory, hash-chained ledger of gate decisions.
//!
//! Records are append-only; each carries the hash of its predecessor so a
//! rewritten or reordered record is detected by [`DecisionLedger::verify_integrity`].
//! The ledger is never consulted when deciding, and only the gate that
//! owns it can append.

use crate::error::GateError;
use crate::types::{DecisionId, Proposal, Status};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One recorded gate decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Identifier of the decision
    pub decision_id: DecisionId,
    /// Unix millis
    pub timestamp: u64,
    /// SHA-256 of the proposal text
    pub proposal_digest: [u8; 32],
    /// Gate decision
    pub status: Status,
    /// Hash of the preceding record, zero for the first
    pub prev_hash: [u8; 32],
    /// Hash of this record
    pub hash: [u8; 32],
}

/// Append-only decision ledger
#[derive(Debug, Default)]
pub struct DecisionLedger {
    inner: Mutex<Vec<DecisionRecord>>,
}

impl DecisionLedger {
    /// Create an empty ledger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from previously exported records.
    ///
    /// Records are taken as-is; call [`verify_integrity`](Self::verify_integrity)
    /// before trusting them.
    #[must_use]
    pub fn from_records(records: Vec<DecisionRecord>) -> Self {
        Self {
            inner: Mutex::new(records),
        }
    }

    /// Record a decision about `proposal`
    pub(crate) fn record(&self, proposal: &Proposal, status: Status) -> DecisionId {
        let mut guard = self.inner.lock();
        let prev_hash = guard.last().map_or([0u8; 32], |r| r.hash);
        let mut record = DecisionRecord {
            decision_id: DecisionId::new(),
            timestamp: now_millis(),
            proposal_digest: digest_proposal(proposal),
            status,
            prev_hash,
            hash: [0u8; 32],
        };
        record.hash = compute_hash(&record);
        let id = record.decision_id;
        guard.push(record);
        id
    }

    /// Snapshot of all records
    pub fn records(&self) -> Vec<DecisionRecord> {
        self.inner.lock().clone()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// True if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Count of records with the given status
    pub fn count(&self, status: Status) -> usize {
        self.inner.lock().iter().filter(|r| r.status == status).count()
    }

    /// Walk the chain and return the number of records checked
    ///
    /// # Errors
    /// [`GateError::LedgerIntegrity`] naming the first broken record.
    pub fn verify_integrity(&self) -> Result<usize, GateError> {
        let guard = self.inner.lock();
        let mut prev = [0u8; 32];
        for (index, r) in guard.iter().enumerate() {
            if r.prev_hash != prev || r.hash != compute_hash(r) {
                return Err(GateError::LedgerIntegrity { index });
            }
            prev = r.hash;
        }
        Ok(guard.len())
    }
}

/// SHA-256 of the proposal text
#[must_use]
pub fn digest_proposal(proposal: &Proposal) -> [u8; 32] {
    Sha256::digest(proposal.text.as_bytes()).into()
}

fn compute_hash(record: &DecisionRecord) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(record.decision_id.0.as_bytes());
    hasher.update(record.timestamp.to_le_bytes());
    hasher.update(record.proposal_digest);
    hasher.update([record.status.as_u8()]);
    hasher.update(record.prev_hash);
    hasher.finalize().into()
}

fn now_millis() -> u64 {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    u64::try_from(millis).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_ledger() -> DecisionLedger {
        let ledger = DecisionLedger::new();
        ledger.record(&Proposal::new("a", 0.42), Status::Refused);
        ledger.record(&Proposal::new("b", 0.42), Status::Executed);
        ledger.record(&Proposal::new("c", 0.42), Status::Refused);
        ledger
    }

    #[test]
    fn empty_ledger_verifies() {
        assert_eq!(DecisionLedger::new().verify_integrity().unwrap(), 0);
    }

    #[test]
    fn records_are_chained() {
        let ledger = filled_ledger();
        let records = ledger.records();

        assert_eq!(records[0].prev_hash, [0u8; 32]);
        assert_eq!(records[1].prev_hash, records[0].hash);
        assert_eq!(records[2].prev_hash, records[1].hash);
        assert_eq!(ledger.verify_integrity().unwrap(), 3);
    }

    #[test]
    fn counts_by_status() {
        let ledger = filled_ledger();
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.count(Status::Refused), 2);
        assert_eq!(ledger.count(Status::Executed), 1);
    }

    #[test]
    fn detects_rewritten_status() {
        let mut records = filled_ledger().records();
        records[1].status = Status::Refused;

        let tampered = DecisionLedger::from_records(records);
        let err = tampered.verify_integrity().unwrap_err();
        assert!(matches!(err, GateError::LedgerIntegrity { index: 1 }));
    }

    #[test]
    fn detects_dropped_record() {
        let mut records = filled_ledger().records();
        records.remove(1);

        let tampered = DecisionLedger::from_records(records);
        let err = tampered.verify_integrity().unwrap_err();
        assert!(matches!(err, GateError::LedgerIntegrity { index: 1 }));
    }

    #[test]
    fn digest_depends_only_on_text() {
        let a = digest_proposal(&Proposal::new("same", 0.1));
        let b = digest_proposal(&Proposal::new("same", 0.9));
        let c = digest_proposal(&Proposal::new("other", 0.1));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
