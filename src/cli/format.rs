//! Output formatting for the session display.

use std::fmt::Write;

use jiff::civil::DateTime;

use crate::ledger::{Acceptance, Rejection, VoteOutcome};
use crate::model::{Tally, VoteChoice, VoteRecord};
use crate::window::{self, PollWindowConfig};

/// What the poll card needs to know about the acting voter.
pub(super) struct CardView<'a> {
    pub voter_name: &'a str,
    pub record: Option<&'a VoteRecord>,
    pub can_change: bool,
    pub now: DateTime,
    pub window: PollWindowConfig,
    pub simulated: bool,
}

/// The voting card: open/closed state and what the voter can do next.
pub(super) fn format_card(view: &CardView<'_>) -> String {
    let open = window::is_open(view.now, &view.window);
    let mut out = String::new();

    let badge = if open { "OPEN" } else { "CLOSED" };
    let _ = writeln!(out, "Team Lunch [{badge}]  ({})", view.voter_name);
    out.push_str(if open {
        "Poll is open! Will you join us?\n"
    } else {
        "Voting is currently closed.\n"
    });
    let clock_note = if view.simulated { " (simulated)" } else { "" };
    let _ = writeln!(
        out,
        "Current Time: {}{clock_note} | Open: {}",
        window::hhmm(window::minutes_since_midnight(view.now)),
        view.window,
    );

    if !open {
        out.push_str("Voting is closed for today.\n");
        let _ = writeln!(
            out,
            "Please come back tomorrow at {}.",
            window::hhmm(view.window.open_at())
        );
        return out;
    }

    match view.record {
        None => {
            out.push_str("  vote yes   Yes, I'm in!\n");
            out.push_str("  vote no    No, maybe later\n");
        }
        Some(record) => {
            let _ = writeln!(out, "You voted: {}", record.choice.label());
            if view.can_change {
                let _ = writeln!(
                    out,
                    "You can change your mind once. ('change' switches to {})",
                    record.choice.opposite().label()
                );
            } else {
                out.push_str("Decision locked (Limit reached)\n");
            }
        }
    }
    out
}

/// Live results: counts and who is going.
pub(super) fn format_results(tally: &Tally) -> String {
    if tally.is_empty() {
        return "No votes yet today.\n".to_string();
    }

    let mut out = String::from("Live Results\n");
    let _ = writeln!(out, "  Having Lunch: {}", tally.affirm_count);
    let _ = writeln!(out, "  Skipping:     {}", tally.decline_count);
    let _ = writeln!(out, "Who's going ({})", tally.affirm_count);
    if tally.affirming_voters.is_empty() {
        out.push_str("  No one yet...\n");
    }
    for name in &tally.affirming_voters {
        let _ = writeln!(out, "  {name}");
    }
    out
}

/// One line describing what happened to a vote attempt.
pub(super) fn format_outcome(outcome: VoteOutcome, choice: VoteChoice) -> String {
    match outcome {
        VoteOutcome::Accepted(Acceptance::New) => format!("Vote recorded: {}", choice.label()),
        VoteOutcome::Accepted(Acceptance::Revised) => {
            format!("Vote changed to {}. Decision locked.", choice.label())
        }
        VoteOutcome::Rejected(Rejection::WindowClosed) => "Voting is currently closed.".to_string(),
        VoteOutcome::Rejected(Rejection::LimitReached) => {
            "Decision locked (Limit reached)".to_string()
        }
    }
}
