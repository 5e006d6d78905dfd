//! Vote ledger: one record per voter, at most one revision each.
//!
//! The ledger is a plain owned value. Mutation consumes it and hands it back,
//! unchanged when the vote is rejected, so callers always hold the current
//! state explicitly.
//!
//! Records keep first-cast order. Lookups are linear; a ledger holds one
//! record per participant and stays small.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::model::{Tally, VoteChoice, VoteRecord, VoterIdentity};

/// How many times a voter may change their vote after the first cast.
pub const REVISION_LIMIT: u8 = 1;

/// Result of a vote attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "camelCase")]
pub enum VoteOutcome {
    Accepted(Acceptance),
    Rejected(Rejection),
}

/// Why a vote was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Acceptance {
    /// First vote from this voter.
    New,

    /// The voter's single allowed change.
    Revised,
}

/// Why a vote was ignored. Never fatal: the ledger is simply left as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
pub enum Rejection {
    #[error("voting is closed")]
    WindowClosed,

    #[error("decision locked (limit reached)")]
    LimitReached,
}

/// Every current vote, keyed by voter id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteLedger {
    records: Vec<VoteRecord>,
}

impl VoteLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a first vote or the voter's single revision.
    ///
    /// A second call always consumes the revision, even when it repeats the
    /// choice already on record. Any call after that is rejected with
    /// [`Rejection::LimitReached`] and the ledger is returned as it was.
    #[must_use]
    pub fn cast_or_revise(
        mut self,
        voter: &VoterIdentity,
        choice: VoteChoice,
        now: DateTime,
    ) -> (Self, VoteOutcome) {
        let Some(record) = self.records.iter_mut().find(|r| r.voter_id == voter.id) else {
            self.records.push(VoteRecord {
                voter_id: voter.id.clone(),
                voter_name: voter.name.clone(),
                choice,
                cast_at: now,
                revision_count: 0,
            });
            return (self, VoteOutcome::Accepted(Acceptance::New));
        };

        if !has_revision_left(record) {
            return (self, VoteOutcome::Rejected(Rejection::LimitReached));
        }

        record.choice = choice;
        record.cast_at = now;
        record.revision_count += 1;
        (self, VoteOutcome::Accepted(Acceptance::Revised))
    }

    /// The current record for a voter, if they have voted.
    #[must_use]
    pub fn lookup(&self, voter_id: &str) -> Option<&VoteRecord> {
        self.records.iter().find(|r| r.voter_id == voter_id)
    }

    /// Counts and names per choice, in first-cast order.
    #[must_use]
    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for record in &self.records {
            match record.choice {
                VoteChoice::Affirm => {
                    tally.affirm_count += 1;
                    tally.affirming_voters.push(record.voter_name.clone());
                }
                VoteChoice::Decline => {
                    tally.decline_count += 1;
                    tally.declining_voters.push(record.voter_name.clone());
                }
            }
        }
        tally
    }

    /// All records in first-cast order.
    pub fn records(&self) -> impl Iterator<Item = &VoteRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Shared by [`VoteLedger::cast_or_revise`] and [`crate::poll::can_change`]
/// so the two can never disagree.
pub(crate) fn has_revision_left(record: &VoteRecord) -> bool {
    record.revision_count < REVISION_LIMIT
}
