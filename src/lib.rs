//! Lunchpoll: a daily yes/no lunch poll with a time-gated voting window.
//!
//! The poll core is three small pieces:
//!
//! - [`window`] decides whether votes are accepted at a given wall-clock time.
//! - [`ledger`] holds one vote per voter and allows a single revision.
//! - [`poll`] combines the two and is what presentation layers call.
//!
//! Around it sit the collaborators a host needs: [`identity`] resolution,
//! turnout [`summary`] generation, [`config`], a simulated [`clock`], and
//! the terminal [`cli`].

pub mod cli;
pub mod clock;
pub mod config;
pub mod identity;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod poll;
pub mod seed;
pub mod summary;
pub mod window;
