//! Voter identity: who is acting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque voter id plus the name shown next to their vote.
///
/// Supplied by whoever hosts the poll. Never validated or generated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterIdentity {
    pub id: String,
    pub name: String,
}

impl VoterIdentity {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for VoterIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
