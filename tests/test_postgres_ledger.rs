//! Vote ledger against a real Postgres `image_votes` table.
//!
//! Runs only when `DATABASE_URL` is set; otherwise the test returns early.

use std::sync::Arc;
use image_gallery::{Identity, PostgresVoteStore, VoteLedger, VoteStore, VoteTallyService, VoteType};

async fn connect() -> Option<PostgresVoteStore> {
    dotenv::dotenv().ok();
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => {
            println!("DATABASE_URL not set; skipping Postgres ledger test");
            return None;
        }
    };
    Some(
        PostgresVoteStore::connect(&url, 2)
            .await
            .expect("Failed to connect to test Postgres"),
    )
}

/// Image id unique to this run so reruns don't see stale rows.
fn scratch_image_id(label: &str) -> String {
    format!("test-{}-{}", label, chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_upsert_conflict_target_keeps_one_row() -> Result<(), Box<dyn std::error::Error>> {
    let Some(store) = connect().await else {
        return Ok(());
    };
    let image_id = scratch_image_id("upsert");
    let me = Identity::new("1.2.3.4");

    store.upsert(&image_id, &me, VoteType::Up).await?;
    store.upsert(&image_id, &me, VoteType::Down).await?;

    let votes = store.list_for_image(&image_id).await?;
    assert_eq!(votes.len(), 1);
    assert_eq!(votes[0].vote_type, VoteType::Down);
    assert_eq!(votes[0].identity, me);

    assert!(store.remove(&image_id, &me).await?);
    assert!(!store.remove(&image_id, &me).await?);
    assert!(store.list_for_image(&image_id).await?.is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tally_toggle_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let Some(store) = connect().await else {
        return Ok(());
    };
    let image_id = scratch_image_id("tally");
    let store = Arc::new(store);

    let tally = VoteTallyService::new(VoteLedger::new(store.clone()));
    tally.set_identity(Identity::new("1.2.3.4")).await;

    let outcome = tally.upvote(&image_id).await?;
    assert!(!outcome.result.removed);
    assert_eq!(outcome.tally.upvotes, 1);
    assert_eq!(outcome.tally.downvotes, 0);
    assert_eq!(outcome.tally.user_vote, Some(VoteType::Up));

    let outcome = tally.upvote(&image_id).await?;
    assert!(outcome.result.removed);
    assert_eq!(outcome.tally.upvotes, 0);
    assert_eq!(outcome.tally.user_vote, None);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM image_votes WHERE image_id = $1")
        .bind(&image_id)
        .fetch_one(store.pool())
        .await?;
    assert_eq!(count, 0);
    Ok(())
}
