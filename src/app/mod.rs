//! Services composed from the domain, storage and infra layers.

pub mod ledger;
pub mod tally_service;

pub use ledger::{VoteError, VoteLedger};
pub use tally_service::{VoteOutcome, VoteTallyService};
