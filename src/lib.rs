pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{VoteError, VoteLedger, VoteOutcome, VoteTallyService};
pub use domain::gallery::{seed, Image, ImageCollection, ImageDraft, ImagePatch, ImageSource};
pub use domain::identity::Identity;
pub use domain::vote::{CastResult, Vote, VoteCount, VoteType};
pub use infra::config::Config;
pub use infra::identity::{AddressLookup, IdentityError, IdentityResolver};
pub use storage::votes::{MemoryVoteStore, PostgresVoteStore, VoteStore};
