//! Interactive poll session.
//!
//! Owns the session's ledger, clock, and acting voter, and threads them
//! through the poll controller on every command. Input and output are
//! generic so tests can drive a session with in-memory buffers.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::clock::SessionClock;
use crate::ledger::{VoteLedger, VoteOutcome};
use crate::model::{VoteChoice, VoterIdentity};
use crate::poll::{self, PollState};
use crate::seed;
use crate::summary::Summarizer;
use crate::window::PollWindowConfig;

use super::command::{SessionCommand, TimeSetting};
use super::format::{CardView, format_card, format_outcome, format_results};

const PROMPT: &str = "lunchpoll> ";

const HELP: &str = "\
Commands:
  vote yes | vote no     cast your vote
  change                 switch to the other choice (once)
  time <preset|HH:MM>    simulate a time: early, open, ending, closed, real
  as <id> [name]         act as another voter
  status                 show the poll card
  results                show live results
  json                   print the tally as JSON
  summary                ask the AI chef for a turnout summary
  quit                   leave (votes are not kept)
";

/// One user's session with the poll.
pub struct Session {
    ledger: VoteLedger,
    clock: SessionClock,
    window: PollWindowConfig,
    voter: VoterIdentity,
    summarizer: Box<dyn Summarizer>,
}

impl Session {
    #[must_use]
    pub fn new(
        voter: VoterIdentity,
        window: PollWindowConfig,
        clock: SessionClock,
        summarizer: Box<dyn Summarizer>,
    ) -> Self {
        Self {
            ledger: VoteLedger::new(),
            clock,
            window,
            voter,
            summarizer,
        }
    }

    /// Replaces the ledger with the demo votes.
    pub fn seed_demo_votes(&mut self) {
        self.ledger = seed::demo_ledger(self.clock.now());
        debug!(votes = self.ledger.len(), "seeded demo votes");
    }

    #[must_use]
    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    /// Submits a vote for the acting voter at the session's current time.
    pub fn vote(&mut self, choice: VoteChoice) -> VoteOutcome {
        let state = PollState {
            ledger: std::mem::take(&mut self.ledger),
            now: self.clock.now(),
            config: self.window,
        };
        let (ledger, outcome) = poll::submit_vote(state, &self.voter, choice);
        self.ledger = ledger;
        outcome
    }

    /// Reads commands until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns any error from reading `input` or writing to `out`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        info!(voter = %self.voter, window = %self.window, "session started");
        out.write_all(self.card().as_bytes())?;

        let mut lines = input.lines();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            let Some(line) = lines.next().transpose()? else {
                writeln!(out)?;
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<SessionCommand>() {
                Ok(SessionCommand::Quit) => break,
                Ok(command) => self.execute(command, out)?,
                Err(message) => writeln!(out, "{message}")?,
            }
        }

        info!(votes = self.ledger.len(), "session ended, votes discarded");
        Ok(())
    }

    fn execute<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> io::Result<()> {
        match command {
            SessionCommand::Vote(choice) => {
                let outcome = self.vote(choice);
                writeln!(out, "{}", format_outcome(outcome, choice))?;
            }
            SessionCommand::Change => match self.ledger.lookup(&self.voter.id) {
                Some(record) => {
                    let choice = record.choice.opposite();
                    let outcome = self.vote(choice);
                    writeln!(out, "{}", format_outcome(outcome, choice))?;
                }
                None => writeln!(out, "You haven't voted yet. Try 'vote yes' or 'vote no'.")?,
            },
            SessionCommand::Time(setting) => {
                match setting {
                    TimeSetting::Real => self.clock.reset(),
                    TimeSetting::Preset(preset) => {
                        let (hour, minute) = preset.hour_minute();
                        self.simulate(hour, minute, out)?;
                    }
                    TimeSetting::At(hour, minute) => self.simulate(hour, minute, out)?,
                }
                out.write_all(self.card().as_bytes())?;
            }
            SessionCommand::As(voter) => {
                debug!(from = %self.voter.id, to = %voter.id, "switching voter");
                self.voter = voter;
                out.write_all(self.card().as_bytes())?;
            }
            SessionCommand::Status => out.write_all(self.card().as_bytes())?,
            SessionCommand::Results => {
                out.write_all(format_results(&self.ledger.tally()).as_bytes())?;
            }
            SessionCommand::Json => {
                let json = serde_json::to_string_pretty(&self.ledger.tally())
                    .map_err(io::Error::other)?;
                writeln!(out, "{json}")?;
            }
            SessionCommand::Summary => {
                let tally = self.ledger.tally();
                if tally.is_empty() {
                    writeln!(out, "No votes yet today.")?;
                } else {
                    writeln!(
                        out,
                        "AI Chef says: \"{}\"",
                        self.summarizer.summarize(&tally)
                    )?;
                }
            }
            SessionCommand::Help => out.write_all(HELP.as_bytes())?,
            SessionCommand::Quit => {}
        }
        Ok(())
    }

    fn simulate<W: Write>(&mut self, hour: i8, minute: i8, out: &mut W) -> io::Result<()> {
        if let Err(e) = self.clock.simulate(hour, minute) {
            writeln!(out, "invalid time: {e}")?;
        }
        Ok(())
    }

    fn card(&self) -> String {
        format_card(&CardView {
            voter_name: &self.voter.name,
            record: self.ledger.lookup(&self.voter.id),
            can_change: poll::can_change(&self.ledger, &self.voter.id),
            now: self.clock.now(),
            window: self.window,
            simulated: self.clock.is_simulated(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    use crate::summary::FixedSummarizer;

    fn session_at(hour: i8, minute: i8) -> Session {
        Session::new(
            VoterIdentity::new("v1", "Alice"),
            PollWindowConfig::default(),
            SessionClock::Simulated(date(2024, 6, 3).at(hour, minute, 0, 0)),
            Box::new(FixedSummarizer("Tacos for two.".into())),
        )
    }

    fn drive(session: &mut Session, script: &str) -> String {
        let mut out = Vec::new();
        session.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn vote_change_and_lock() {
        let mut session = session_at(9, 0);
        let output = drive(&mut session, "vote yes\nchange\nchange\nquit\n");

        assert!(output.contains("Vote recorded: YES"));
        assert!(output.contains("Vote changed to NO. Decision locked."));
        assert!(output.contains("Decision locked (Limit reached)"));

        let record = session.ledger().lookup("v1").unwrap();
        assert_eq!(record.choice, VoteChoice::Decline);
        assert_eq!(record.revision_count, 1);
    }

    #[test]
    fn closed_window_ignores_votes() {
        let mut session = session_at(9, 0);
        let output = drive(&mut session, "time closed\nvote yes\n");

        assert!(output.contains("Team Lunch [CLOSED]"));
        assert!(output.contains("Voting is currently closed."));
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn time_travel_reopens_poll() {
        let mut session = session_at(7, 0);
        drive(&mut session, "vote no\ntime 08:30\nvote no\n");

        assert_eq!(session.ledger().len(), 1);
        assert_eq!(
            session.ledger().lookup("v1").unwrap().cast_at,
            date(2024, 6, 3).at(8, 30, 0, 0)
        );
    }

    #[test]
    fn change_before_voting() {
        let mut session = session_at(9, 0);
        let output = drive(&mut session, "change\n");
        assert!(output.contains("You haven't voted yet."));
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn switching_voters_keeps_ledger() {
        let mut session = session_at(9, 0);
        session.seed_demo_votes();
        let output = drive(&mut session, "as u3 Mike\nchange\nresults\n");

        assert!(output.contains("Vote changed to YES. Decision locked."));
        assert!(output.contains("Who's going (3)"));
        assert_eq!(
            session.ledger().tally().affirming_voters,
            vec!["Sarah", "Mike", "Emily"]
        );
    }

    #[test]
    fn summary_uses_summarizer() {
        let mut session = session_at(9, 0);
        session.seed_demo_votes();
        let output = drive(&mut session, "summary\n");
        assert!(output.contains("AI Chef says: \"Tacos for two.\""));
    }

    #[test]
    fn summary_skipped_without_votes() {
        let mut session = session_at(9, 0);
        let output = drive(&mut session, "summary\n");
        assert!(output.contains("No votes yet today."));
        assert!(!output.contains("AI Chef"));
    }

    #[test]
    fn json_prints_tally() {
        let mut session = session_at(9, 0);
        session.seed_demo_votes();
        let output = drive(&mut session, "json\n");
        assert!(output.contains("\"affirmCount\": 2"));
        assert!(output.contains("\"decliningVoters\": ["));
    }

    #[test]
    fn unknown_commands_are_reported() {
        let mut session = session_at(9, 0);
        let output = drive(&mut session, "dance\n\n");
        assert!(output.contains("unknown command 'dance'"));
    }

    #[test]
    fn real_time_and_help() {
        let mut session = session_at(9, 0);
        let output = drive(&mut session, "time real\nhelp\nquit\n");

        assert_eq!(session.clock, SessionClock::Real);
        assert_eq!(output.matches("(simulated)").count(), 1);
        assert!(output.contains("Commands:"));
        assert!(output.contains("vote yes | vote no"));
    }

    #[test]
    fn invalid_time_keeps_clock() {
        let mut session = session_at(9, 0);
        let output = drive(&mut session, "time 23:61\nvote yes\n");
        assert!(output.contains("invalid time"));
        assert!(output.contains("Vote recorded: YES"));
    }
}
