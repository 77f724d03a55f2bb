pub mod memory;
pub mod postgres;

pub use memory::MemoryVoteStore;
pub use postgres::PostgresVoteStore;

use crate::domain::identity::Identity;
use crate::domain::vote::{Vote, VoteType};
use async_trait::async_trait;

/// Persistence for vote rows, keyed by `(image_id, identity)`.
///
/// Implementations must keep at most one row per pair: `upsert` replaces the
/// vote type of an existing row instead of adding a second one.
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Cheap connectivity check.
    async fn ping(&self) -> anyhow::Result<()>;

    async fn list_for_image(&self, image_id: &str) -> anyhow::Result<Vec<Vote>>;

    async fn upsert(
        &self,
        image_id: &str,
        identity: &Identity,
        vote_type: VoteType,
    ) -> anyhow::Result<()>;

    /// Deletes the pair's row. Returns whether a row existed.
    async fn remove(&self, image_id: &str, identity: &Identity) -> anyhow::Result<bool>;
}
