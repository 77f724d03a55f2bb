//! The vote ledger client.
//!
//! Reads every vote on an image and applies one cast for one identity,
//! deciding between toggle-off and upsert from the caller-supplied current
//! vote (taken from the latest tally, so no extra read is needed).

use crate::domain::identity::Identity;
use crate::domain::vote::{plan_cast, CastResult, LedgerAction, Vote, VoteType};
use crate::storage::votes::VoteStore;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum VoteError {
    #[error("Vote ledger unavailable: {0}")]
    LedgerUnavailable(String),

    #[error("Identity not resolved yet")]
    IdentityUnresolved,
}

impl From<anyhow::Error> for VoteError {
    fn from(err: anyhow::Error) -> Self {
        VoteError::LedgerUnavailable(format!("{:#}", err))
    }
}

#[derive(Clone)]
pub struct VoteLedger {
    store: Arc<dyn VoteStore>,
}

impl VoteLedger {
    pub fn new(store: Arc<dyn VoteStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn VoteStore> {
        &self.store
    }

    pub async fn list_votes(&self, image_id: &str) -> Result<Vec<Vote>, VoteError> {
        Ok(self.store.list_for_image(image_id).await?)
    }

    pub async fn cast_vote(
        &self,
        image_id: &str,
        identity: Option<&Identity>,
        vote_type: VoteType,
        current: Option<VoteType>,
    ) -> Result<CastResult, VoteError> {
        let identity = identity.ok_or(VoteError::IdentityUnresolved)?;

        match plan_cast(current, vote_type) {
            LedgerAction::Remove => {
                let existed = self.store.remove(image_id, identity).await?;
                debug!(
                    "Removed {} vote on image {} (row existed: {})",
                    vote_type, image_id, existed
                );
                Ok(CastResult {
                    removed: true,
                    vote_type,
                })
            }
            LedgerAction::Upsert(vote_type) => {
                self.store.upsert(image_id, identity, vote_type).await?;
                debug!("Recorded {} vote on image {}", vote_type, image_id);
                Ok(CastResult {
                    removed: false,
                    vote_type,
                })
            }
        }
    }
}
