//! Session command parsing: one line of input, one command.

use std::str::FromStr;

use crate::clock::{self, TimePreset};
use crate::model::{VoteChoice, VoterIdentity};

/// What the user asked for on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum SessionCommand {
    Vote(VoteChoice),
    /// Switch to the opposite of the current vote.
    Change,
    Time(TimeSetting),
    /// Act as a different voter from here on.
    As(VoterIdentity),
    Status,
    Results,
    Json,
    Summary,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TimeSetting {
    Preset(TimePreset),
    At(i8, i8),
    Real,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err("empty command".to_string());
        };
        let rest: Vec<&str> = words.collect();

        let command = match (verb.to_lowercase().as_str(), rest.as_slice()) {
            ("vote", [choice]) => Self::Vote(parse_choice(choice)?),
            ("vote", _) => return Err("usage: vote yes|no".to_string()),
            ("yes", []) => Self::Vote(VoteChoice::Affirm),
            ("no", []) => Self::Vote(VoteChoice::Decline),
            ("change" | "switch", []) => Self::Change,
            ("time", [setting]) => Self::Time(parse_time_setting(setting)?),
            ("time", _) => {
                return Err("usage: time early|open|ending|closed|real|HH:MM".to_string());
            }
            ("as", [id, name @ ..]) => {
                let name = if name.is_empty() {
                    (*id).to_string()
                } else {
                    name.join(" ")
                };
                Self::As(VoterIdentity::new(*id, name))
            }
            ("as", []) => return Err("usage: as <id> [name]".to_string()),
            ("status", []) => Self::Status,
            ("results", []) => Self::Results,
            ("json", []) => Self::Json,
            ("summary", []) => Self::Summary,
            ("help" | "?", []) => Self::Help,
            ("quit" | "exit" | "q", []) => Self::Quit,
            (other, _) => return Err(format!("unknown command '{other}' (try 'help')")),
        };
        Ok(command)
    }
}

fn parse_choice(word: &str) -> Result<VoteChoice, String> {
    match word.to_lowercase().as_str() {
        "yes" | "y" | "in" => Ok(VoteChoice::Affirm),
        "no" | "n" | "out" => Ok(VoteChoice::Decline),
        other => Err(format!("unknown choice '{other}' (expected yes or no)")),
    }
}

fn parse_time_setting(word: &str) -> Result<TimeSetting, String> {
    let word = word.to_lowercase();
    if word == "real" {
        return Ok(TimeSetting::Real);
    }
    if let Ok(preset) = word.parse::<TimePreset>() {
        return Ok(TimeSetting::Preset(preset));
    }
    let (hour, minute) = clock::parse_hhmm(&word)?;
    Ok(TimeSetting::At(hour, minute))
}
