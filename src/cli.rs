//! CLI interface for Lunchpoll.
//!
//! A terminal rendition of the lunch poll mini-app. State lives only as long
//! as the process: each run starts a fresh ledger, seeded with demo votes
//! unless told otherwise.
//!
//! - `lunchpoll` / `lunchpoll session`: interactive session, one command per line.
//! - `lunchpoll window`: whether the poll accepts votes right now.

mod command;
mod format;
mod session;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info_span;
use uuid::Uuid;

use crate::clock::{self, SessionClock};
use crate::config::Config;
use crate::identity::{self, Configured, Environment, Explicit, HostSession};
use crate::summary::GeminiSummarizer;
use crate::window;

pub use session::Session;

/// Lunchpoll: who's in for lunch today?
#[derive(Debug, Parser)]
#[command(name = "lunchpoll", after_long_help = SESSION_HELP)]
pub struct Cli {
    /// Config file (default: `~/.lunchpoll/config.toml`).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Simulated time of day, `HH:MM`. Uses the real clock when omitted.
    #[arg(long, global = true, value_parser = clock::parse_hhmm)]
    at: Option<(i8, i8)>,

    /// Voter id to act as.
    #[arg(long = "as", global = true)]
    voter: Option<String>,

    /// Display name for `--as`.
    #[arg(long, global = true, requires = "voter")]
    name: Option<String>,

    /// Start with an empty ledger instead of the demo votes.
    #[arg(long, global = true)]
    no_seed: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

const SESSION_HELP: &str = r"Session commands:
  vote yes | vote no     cast your vote
  change                 switch to the other choice (once)
  time <preset|HH:MM>    simulate a time: early, open, ending, closed, real
  as <id> [name]         act as another voter
  status | results       show the poll card or live results
  json                   print the tally as JSON
  summary                ask the AI chef for a turnout summary
  quit";

#[derive(Debug, Subcommand)]
enum Command {
    /// Run an interactive poll session (the default).
    Session,

    /// Report whether the poll is open.
    Window,
}

/// Run the CLI, returning an error message on failure.
///
/// # Errors
///
/// Returns a message describing the first setup or session I/O failure.
pub fn run(cli: Cli, config: &Config) -> Result<(), String> {
    let poll_window = config
        .poll_window()
        .map_err(|e| format!("invalid poll window: {e}"))?;

    let mut clock = SessionClock::Real;
    if let Some((hour, minute)) = cli.at {
        clock
            .simulate(hour, minute)
            .map_err(|e| format!("invalid --at time: {e}"))?;
    }

    match cli.command.unwrap_or(Command::Session) {
        Command::Window => {
            let now = clock.now();
            let state = if window::is_open(now, &poll_window) {
                "open"
            } else {
                "closed"
            };
            println!(
                "{state} at {} (window {poll_window})",
                window::hhmm(window::minutes_since_midnight(now))
            );
            Ok(())
        }
        Command::Session => {
            let explicit = Explicit {
                id: cli.voter.as_deref(),
                name: cli.name.as_deref(),
            };
            let voter = identity::resolve_identity(&[
                &explicit,
                &HostSession::from_env(),
                &Environment::from_env(),
                &Configured(&config.identity),
            ])
            .map_err(|e| e.to_string())?;

            let session_id = Uuid::new_v4();
            let _span = info_span!("session", id = %session_id).entered();

            let summarizer = GeminiSummarizer::from_config(&config.summary);
            let mut session = Session::new(voter, poll_window, clock, Box::new(summarizer));
            if config.seed_demo_votes && !cli.no_seed {
                session.seed_demo_votes();
            }

            let stdin = io::stdin();
            let mut stdout = io::stdout();
            session
                .run(stdin.lock(), &mut stdout)
                .map_err(|e| format!("session I/O failed: {e}"))
        }
    }
}
