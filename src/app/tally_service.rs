//! Vote tally service: identity + ledger composed into per-image tallies and
//! upvote/downvote actions.
//!
//! Voting is disabled until an identity is known. Every successful cast is
//! followed by a fresh read of the ledger so callers always get the tally as
//! stored, not an optimistic guess.

use crate::app::ledger::{VoteError, VoteLedger};
use crate::domain::identity::Identity;
use crate::domain::vote::{CastResult, VoteCount, VoteType};
use crate::infra::identity::IdentityResolver;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteOutcome {
    pub result: CastResult,
    /// Tally re-read from the ledger after the cast.
    pub tally: VoteCount,
}

impl VoteOutcome {
    /// Confirmation text for the caller, as `(title, description)`.
    pub fn notice(&self) -> (&'static str, String) {
        if self.result.removed {
            ("Vote removed", "Your vote has been removed".to_string())
        } else {
            ("Vote recorded", format!("You voted {}", self.result.vote_type))
        }
    }
}

pub struct VoteTallyService {
    ledger: VoteLedger,
    identity: RwLock<Option<Identity>>,
    /// Latest tally read per image; its `user_vote` decides toggle vs switch.
    latest: Mutex<HashMap<String, VoteCount>>,
}

impl VoteTallyService {
    /// Creates a service with no identity yet; voting stays disabled until
    /// [`set_identity`](Self::set_identity) or identity resolution completes.
    pub fn new(ledger: VoteLedger) -> Self {
        Self {
            ledger,
            identity: RwLock::new(None),
            latest: Mutex::new(HashMap::new()),
        }
    }

    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    pub async fn identity(&self) -> Option<Identity> {
        self.identity.read().await.clone()
    }

    pub async fn voting_enabled(&self) -> bool {
        self.identity.read().await.is_some()
    }

    /// Sets the caller identity. Remembered tallies are dropped because their
    /// `user_vote` belonged to the previous identity.
    pub async fn set_identity(&self, identity: Identity) {
        info!("Voting enabled for identity {}", identity);
        *self.identity.write().await = Some(identity);
        self.latest.lock().await.clear();
    }

    /// Resolves the identity in the background.
    ///
    /// The task holds only a weak reference: if the service is dropped while
    /// the lookup is in flight, the result is discarded.
    pub fn spawn_identity_resolution(self: &Arc<Self>, resolver: IdentityResolver) -> JoinHandle<()> {
        let service = Arc::downgrade(self);
        tokio::spawn(async move {
            let identity = resolver.resolve().await;
            match service.upgrade() {
                Some(service) => service.set_identity(identity).await,
                None => debug!("Tally service dropped before identity resolved; discarding"),
            }
        })
    }

    /// Counts the votes on `image_id` and the caller's current vote.
    ///
    /// Ledger failures degrade to the zero tally.
    pub async fn get_tally(&self, image_id: &str) -> VoteCount {
        let identity = self.identity().await;
        match self.ledger.list_votes(image_id).await {
            Ok(votes) => {
                let tally = VoteCount::from_votes(&votes, identity.as_ref());
                if identity.is_some() {
                    self.latest.lock().await.insert(image_id.to_string(), tally);
                }
                tally
            }
            Err(e) => {
                warn!("Tally for image {} unavailable: {}", image_id, e);
                self.forget(image_id).await;
                VoteCount::default()
            }
        }
    }

    pub async fn upvote(&self, image_id: &str) -> Result<VoteOutcome, VoteError> {
        self.cast(image_id, VoteType::Up).await
    }

    pub async fn downvote(&self, image_id: &str) -> Result<VoteOutcome, VoteError> {
        self.cast(image_id, VoteType::Down).await
    }

    pub async fn cast(&self, image_id: &str, vote_type: VoteType) -> Result<VoteOutcome, VoteError> {
        let identity = self.identity().await.ok_or(VoteError::IdentityUnresolved)?;

        let remembered = self.latest.lock().await.get(image_id).copied();
        let current = match remembered {
            Some(tally) => tally.user_vote,
            None => self.get_tally(image_id).await.user_vote,
        };

        let result = match self
            .ledger
            .cast_vote(image_id, Some(&identity), vote_type, current)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!("Vote on image {} failed: {}", image_id, e);
                self.forget(image_id).await;
                return Err(e);
            }
        };

        let tally = self.get_tally(image_id).await;
        info!(
            "Image {}: {} vote {} -> {} up / {} down",
            image_id,
            vote_type,
            if result.removed { "removed" } else { "recorded" },
            tally.upvotes,
            tally.downvotes
        );
        Ok(VoteOutcome { result, tally })
    }

    /// Drops the remembered tally for `image_id` (e.g. after the image is deleted).
    pub async fn forget(&self, image_id: &str) {
        self.latest.lock().await.remove(image_id);
    }
}
