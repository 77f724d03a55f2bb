//! Process-local vote store, used when no database is configured and in tests.

use crate::domain::identity::Identity;
use crate::domain::vote::{Vote, VoteType};
use crate::storage::votes::VoteStore;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct MemoryVoteStore {
    rows: Mutex<HashMap<(String, Identity), Vote>>,
}

impl MemoryVoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of rows across all images.
    pub async fn row_count(&self) -> usize {
        self.rows.lock().await.len()
    }
}

#[async_trait]
impl VoteStore for MemoryVoteStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn list_for_image(&self, image_id: &str) -> Result<Vec<Vote>> {
        let rows = self.rows.lock().await;
        let mut votes: Vec<Vote> = rows
            .values()
            .filter(|vote| vote.image_id == image_id)
            .cloned()
            .collect();
        votes.sort_by_key(|vote| vote.created_at);
        Ok(votes)
    }

    async fn upsert(&self, image_id: &str, identity: &Identity, vote_type: VoteType) -> Result<()> {
        let mut rows = self.rows.lock().await;
        rows.entry((image_id.to_string(), identity.clone()))
            .and_modify(|vote| vote.vote_type = vote_type)
            .or_insert_with(|| Vote {
                image_id: image_id.to_string(),
                identity: identity.clone(),
                vote_type,
                created_at: Utc::now(),
            });
        Ok(())
    }

    async fn remove(&self, image_id: &str, identity: &Identity) -> Result<bool> {
        let mut rows = self.rows.lock().await;
        Ok(rows
            .remove(&(image_id.to_string(), identity.clone()))
            .is_some())
    }
}
