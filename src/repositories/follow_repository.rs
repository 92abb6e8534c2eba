// src/repositories/follow_repository.rs
use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::models::follow::{Follow, NewFollow};
use crate::repositories::RepoError;

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Fails with `RepoError::Conflict` when the pair already exists.
    async fn insert(&self, follow: NewFollow) -> Result<Follow, RepoError>;
    async fn find(&self, follower_id: Uuid, trainer_id: Uuid) -> Result<Option<Follow>, RepoError>;
    /// Returns whether an edge was removed.
    async fn delete(&self, follower_id: Uuid, trainer_id: Uuid) -> Result<bool, RepoError>;
    /// Edges of one follower, most recently followed first.
    async fn list_by_follower(&self, follower_id: Uuid) -> Result<Vec<Follow>, RepoError>;
}

pub struct PgFollowRepository {
    pool: Pool,
}

impl PgFollowRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn follow_from_row(row: &Row) -> Result<Follow, RepoError> {
    Ok(Follow {
        id: row.try_get("id")?,
        follower_id: row.try_get("follower_id")?,
        trainer_id: row.try_get("trainer_id")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    async fn insert(&self, follow: NewFollow) -> Result<Follow, RepoError> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached(
                "INSERT INTO follows (id, follower_id, trainer_id) VALUES ($1, $2, $3) \
                 RETURNING id, follower_id, trainer_id, created_at",
            )
            .await?;
        let row = client
            .query_one(&stmt, &[&Uuid::new_v4(), &follow.follower_id, &follow.trainer_id])
            .await?;
        follow_from_row(&row)
    }

    async fn find(&self, follower_id: Uuid, trainer_id: Uuid) -> Result<Option<Follow>, RepoError> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached(
                "SELECT id, follower_id, trainer_id, created_at FROM follows \
                 WHERE follower_id = $1 AND trainer_id = $2",
            )
            .await?;
        client
            .query_opt(&stmt, &[&follower_id, &trainer_id])
            .await?
            .as_ref()
            .map(follow_from_row)
            .transpose()
    }

    async fn delete(&self, follower_id: Uuid, trainer_id: Uuid) -> Result<bool, RepoError> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached("DELETE FROM follows WHERE follower_id = $1 AND trainer_id = $2")
            .await?;
        let removed = client.execute(&stmt, &[&follower_id, &trainer_id]).await?;
        Ok(removed > 0)
    }

    async fn list_by_follower(&self, follower_id: Uuid) -> Result<Vec<Follow>, RepoError> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached(
                "SELECT id, follower_id, trainer_id, created_at FROM follows \
                 WHERE follower_id = $1 ORDER BY created_at DESC",
            )
            .await?;
        let rows = client.query(&stmt, &[&follower_id]).await?;
        rows.iter().map(follow_from_row).collect()
    }
}
