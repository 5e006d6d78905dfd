//! Core data model for the lunch poll.
//!
//! These types carry no behavior beyond small helpers. The rules live in
//! [`crate::window`], [`crate::ledger`], and [`crate::poll`].

mod tally;
mod vote;
mod voter;

pub use tally::Tally;
pub use vote::{VoteChoice, VoteRecord};
pub use voter::VoterIdentity;
