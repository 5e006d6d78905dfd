//! End-to-end vote scenarios through the public poll API.

use jiff::civil::{DateTime, date};

use lunchpoll::ledger::{Acceptance, Rejection, VoteLedger, VoteOutcome};
use lunchpoll::model::{VoteChoice, VoterIdentity};
use lunchpoll::poll::{PollState, can_change, submit_vote};
use lunchpoll::window::PollWindowConfig;

fn at(hour: i8, minute: i8) -> DateTime {
    date(2024, 6, 3).at(hour, minute, 0, 0)
}

fn submit(
    ledger: VoteLedger,
    now: DateTime,
    voter: &VoterIdentity,
    choice: VoteChoice,
) -> (VoteLedger, VoteOutcome) {
    submit_vote(
        PollState {
            ledger,
            now,
            config: PollWindowConfig::default(),
        },
        voter,
        choice,
    )
}

#[test]
fn first_vote_change_then_locked() {
    let alice = VoterIdentity::new("v1", "Alice");

    let (ledger, outcome) = submit(VoteLedger::new(), at(9, 0), &alice, VoteChoice::Affirm);
    assert_eq!(outcome, VoteOutcome::Accepted(Acceptance::New));
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.lookup("v1").unwrap().revision_count, 0);

    let (ledger, outcome) = submit(ledger, at(9, 10), &alice, VoteChoice::Decline);
    assert_eq!(outcome, VoteOutcome::Accepted(Acceptance::Revised));
    let record = ledger.lookup("v1").unwrap();
    assert_eq!(record.choice, VoteChoice::Decline);
    assert_eq!(record.revision_count, 1);
    assert!(!can_change(&ledger, "v1"));

    let before = ledger.clone();
    let (ledger, outcome) = submit(ledger, at(9, 20), &alice, VoteChoice::Affirm);
    assert_eq!(outcome, VoteOutcome::Rejected(Rejection::LimitReached));
    assert_eq!(ledger, before);
}

#[test]
fn vote_after_close_creates_nothing() {
    let bob = VoterIdentity::new("v2", "Bob");

    let (ledger, outcome) = submit(VoteLedger::new(), at(11, 0), &bob, VoteChoice::Affirm);

    assert_eq!(outcome, VoteOutcome::Rejected(Rejection::WindowClosed));
    assert!(ledger.lookup("v2").is_none());
    assert!(ledger.is_empty());
}

#[test]
fn tally_two_affirm_one_decline() {
    let votes = [
        ("u2", "Sarah", VoteChoice::Affirm),
        ("u3", "Mike", VoteChoice::Decline),
        ("u4", "Emily", VoteChoice::Affirm),
    ];
    let mut ledger = VoteLedger::new();
    for (id, name, choice) in votes {
        (ledger, _) = submit(ledger, at(9, 0), &VoterIdentity::new(id, name), choice);
    }

    let tally = ledger.tally();
    assert_eq!(tally.affirm_count, 2);
    assert_eq!(tally.decline_count, 1);
    assert_eq!(tally.affirming_voters, vec!["Sarah", "Emily"]);
    assert_eq!(tally.total(), ledger.len());
}

#[test]
fn tally_matches_distinct_voters_under_churn() {
    let voters: Vec<VoterIdentity> = (0..6)
        .map(|i| VoterIdentity::new(format!("v{i}"), format!("Voter {i}")))
        .collect();

    let mut ledger = VoteLedger::new();
    for (round, hour) in [8, 9, 10, 11].into_iter().enumerate() {
        for (i, voter) in voters.iter().enumerate() {
            let choice = if (i + round) % 2 == 0 {
                VoteChoice::Affirm
            } else {
                VoteChoice::Decline
            };
            (ledger, _) = submit(ledger, at(hour, 45), voter, choice);
        }
    }

    let tally = ledger.tally();
    assert_eq!(ledger.len(), voters.len());
    assert_eq!(tally.affirm_count + tally.decline_count, voters.len());
    assert!(ledger.records().all(|r| r.revision_count <= 1));
}
