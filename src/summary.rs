//! Turnout summaries: a short, friendly take on who is coming to lunch.
//!
//! A [`Summarizer`] never fails. Implementations that talk to a remote
//! service swallow their errors, log them, and return a fixed fallback line.
//! Nothing here can affect poll state.

mod gemini;

pub use gemini::GeminiSummarizer;

use crate::model::Tally;

/// Turns a tally into free text.
pub trait Summarizer {
    fn summarize(&self, tally: &Tally) -> String;
}

/// Always returns the same text. Useful offline and in tests.
#[derive(Debug, Clone)]
pub struct FixedSummarizer(pub String);

impl Summarizer for FixedSummarizer {
    fn summarize(&self, _tally: &Tally) -> String {
        self.0.clone()
    }
}

/// The prompt sent to a text-generation model for this tally.
#[must_use]
pub fn turnout_prompt(tally: &Tally) -> String {
    format!(
        "You are a cheerful team lunch coordinator bot.\n\
         \n\
         Here is the voting status for today's lunch:\n\
         Going ({going}): {attendees}\n\
         Not Going ({not_going}): {absentees}\n\
         \n\
         Tasks:\n\
         1. Summarize the turnout in a fun, witty way.\n\
         2. Suggest a type of cuisine or restaurant vibe suitable for a group of {going} people.\n\
         3. Keep it under 50 words.\n",
        going = tally.affirm_count,
        attendees = tally.affirming_voters.join(", "),
        not_going = tally.decline_count,
        absentees = tally.declining_voters.join(", "),
    )
}
