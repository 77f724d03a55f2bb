//! Vote ledger backed by the `image_votes` table in PostgreSQL.

use crate::domain::identity::Identity;
use crate::domain::vote::{Vote, VoteType};
use crate::storage::votes::VoteStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::{debug, info};

/// A vote store that uses a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PostgresVoteStore {
    pool: PgPool,
}

impl PostgresVoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects and makes sure the vote table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to connect to Postgres")?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates `image_votes` with the `(image_id, user_ip)` uniqueness constraint
    /// used as the upsert conflict target.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS image_votes (
                id BIGSERIAL PRIMARY KEY,
                image_id TEXT NOT NULL,
                user_ip TEXT NOT NULL,
                vote_type TEXT NOT NULL CHECK (vote_type IN ('up', 'down')),
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                CONSTRAINT image_votes_image_id_user_ip_key UNIQUE (image_id, user_ip)
            )",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create image_votes table")?;

        sqlx::query("CREATE INDEX IF NOT EXISTS image_votes_image_id_idx ON image_votes (image_id)")
            .execute(&self.pool)
            .await
            .context("Failed to create image_votes index")?;

        info!("image_votes table ready");
        Ok(())
    }
}

#[async_trait]
impl VoteStore for PostgresVoteStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_for_image(&self, image_id: &str) -> Result<Vec<Vote>> {
        let rows = sqlx::query(
            "SELECT image_id, user_ip, vote_type, created_at FROM image_votes
             WHERE image_id = $1 ORDER BY created_at",
        )
        .bind(image_id)
        .fetch_all(&self.pool)
        .await?;

        let mut votes = Vec::with_capacity(rows.len());
        for row in rows {
            let vote_type: String = row.try_get("vote_type")?;
            let user_ip: String = row.try_get("user_ip")?;
            let created_at: DateTime<Utc> = row.try_get("created_at")?;
            votes.push(Vote {
                image_id: row.try_get("image_id")?,
                identity: Identity::new(user_ip),
                vote_type: vote_type.parse::<VoteType>().map_err(anyhow::Error::msg)?,
                created_at,
            });
        }
        debug!("Loaded {} votes for image {}", votes.len(), image_id);
        Ok(votes)
    }

    async fn upsert(&self, image_id: &str, identity: &Identity, vote_type: VoteType) -> Result<()> {
        sqlx::query(
            "INSERT INTO image_votes (image_id, user_ip, vote_type) VALUES ($1, $2, $3)
             ON CONFLICT (image_id, user_ip) DO UPDATE SET vote_type = EXCLUDED.vote_type",
        )
        .bind(image_id)
        .bind(identity.as_str())
        .bind(vote_type.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, image_id: &str, identity: &Identity) -> Result<bool> {
        let result = sqlx::query("DELETE FROM image_votes WHERE image_id = $1 AND user_ip = $2")
            .bind(image_id)
            .bind(identity.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
