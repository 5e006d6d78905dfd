//! Vote types: a choice and the record it lands in.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

/// Yes or no. There is no abstain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VoteChoice {
    /// Joining lunch.
    Affirm,

    /// Skipping lunch.
    Decline,
}

impl VoteChoice {
    /// The other choice. Backs the "switch my vote" action.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Affirm => Self::Decline,
            Self::Decline => Self::Affirm,
        }
    }

    /// Short display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Affirm => "YES",
            Self::Decline => "NO",
        }
    }
}

/// One voter's current vote.
///
/// `revision_count` starts at 0 on the first cast and never exceeds
/// [`crate::ledger::REVISION_LIMIT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub voter_id: String,

    /// Captured on the first cast and kept across revisions.
    pub voter_name: String,

    pub choice: VoteChoice,

    /// Logical time of the last mutation.
    pub cast_at: DateTime,

    /// How many times the voter changed their vote after the first cast.
    pub revision_count: u8,
}
