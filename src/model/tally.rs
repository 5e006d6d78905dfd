//! Tally: aggregate view of a ledger for display.

use serde::{Deserialize, Serialize};

/// Counts plus voter names, both lists in first-cast order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub affirm_count: usize,
    pub decline_count: usize,
    pub affirming_voters: Vec<String>,
    pub declining_voters: Vec<String>,
}

impl Tally {
    /// Number of distinct voters counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.affirm_count + self.decline_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
