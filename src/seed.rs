//! Demo data: a few votes already cast when a session starts.

use jiff::civil::DateTime;

use crate::ledger::VoteLedger;
use crate::model::{VoteChoice, VoterIdentity};

/// Sarah is in, Mike is out, Emily is in.
///
/// Built through [`VoteLedger::cast_or_revise`] so seeded records obey the
/// same rules as real ones.
#[must_use]
pub fn demo_ledger(now: DateTime) -> VoteLedger {
    [
        ("u2", "Sarah", VoteChoice::Affirm),
        ("u3", "Mike", VoteChoice::Decline),
        ("u4", "Emily", VoteChoice::Affirm),
    ]
    .into_iter()
    .fold(VoteLedger::new(), |ledger, (id, name, choice)| {
        ledger
            .cast_or_revise(&VoterIdentity::new(id, name), choice, now)
            .0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    #[test]
    fn seeds_three_fresh_votes() {
        let ledger = demo_ledger(date(2024, 6, 3).at(7, 0, 0, 0));

        assert_eq!(ledger.len(), 3);
        assert!(ledger.records().all(|r| r.revision_count == 0));

        let tally = ledger.tally();
        assert_eq!(tally.affirming_voters, vec!["Sarah", "Emily"]);
        assert_eq!(tally.declining_voters, vec!["Mike"]);
    }
}
