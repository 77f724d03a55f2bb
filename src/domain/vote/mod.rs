//! Votes, tallies and the per-identity vote state machine.

pub mod model;
pub mod tally;

pub use model::{CastResult, Vote, VoteCount, VoteType};
pub use tally::{next_state, plan_cast, LedgerAction};
