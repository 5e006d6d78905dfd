//! Poll controller: the entry point presentation layers call.
//!
//! Combines window gating with ledger mutation. State is threaded through
//! explicitly; nothing here reads a clock or holds a singleton.
//!
//! Per voter the poll moves `NoVote -> Voted(0) -> Voted(1)`, only while the
//! window is open. `Voted(1)` is terminal for the rest of the session.

use jiff::civil::DateTime;
use tracing::{debug, info};

use crate::ledger::{self, Rejection, VoteLedger, VoteOutcome};
use crate::model::{VoteChoice, VoterIdentity};
use crate::window::{self, PollWindowConfig};

/// Everything a vote attempt needs besides the voter and their choice.
#[derive(Debug, Clone)]
pub struct PollState {
    pub ledger: VoteLedger,
    pub now: DateTime,
    pub config: PollWindowConfig,
}

/// Applies a vote if the window is open.
///
/// Outside the window the ledger comes back untouched with
/// [`Rejection::WindowClosed`], even for voters who still have a revision
/// left. Inside, the ledger's own revision rule decides.
#[must_use]
pub fn submit_vote(
    state: PollState,
    voter: &VoterIdentity,
    choice: VoteChoice,
) -> (VoteLedger, VoteOutcome) {
    let PollState {
        ledger,
        now,
        config,
    } = state;

    if !window::is_open(now, &config) {
        debug!(voter = %voter.id, %now, window = %config, "vote outside poll window");
        return (ledger, VoteOutcome::Rejected(Rejection::WindowClosed));
    }

    let (ledger, outcome) = ledger.cast_or_revise(voter, choice, now);
    match outcome {
        VoteOutcome::Accepted(kind) => {
            info!(voter = %voter.id, choice = choice.label(), ?kind, "vote accepted");
        }
        VoteOutcome::Rejected(reason) => {
            debug!(voter = %voter.id, %reason, "vote rejected");
        }
    }
    (ledger, outcome)
}

/// Whether a voter may still vote or change their vote.
///
/// Ignores the window: presentation layers check that separately to decide
/// between the voting controls and the closed notice.
#[must_use]
pub fn can_change(ledger: &VoteLedger, voter_id: &str) -> bool {
    ledger
        .lookup(voter_id)
        .is_none_or(ledger::has_revision_left)
}
