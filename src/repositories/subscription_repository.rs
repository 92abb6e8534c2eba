// src/repositories/subscription_repository.rs
use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::models::subscription::{NewSubscription, Subscription, SubscriptionStatus};
use crate::repositories::RepoError;

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Fails with `RepoError::Conflict` when the (user, plan) pair exists,
    /// whatever the status of the existing record.
    async fn insert(&self, subscription: NewSubscription) -> Result<Subscription, RepoError>;
    async fn find(&self, user_id: Uuid, plan_id: Uuid) -> Result<Option<Subscription>, RepoError>;
    /// All records of one user, newest first. Records whose plan was
    /// deleted are included.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Subscription>, RepoError>;
    /// Active records of one user restricted to `plan_ids`.
    async fn list_active_for_plans(
        &self,
        user_id: Uuid,
        plan_ids: &[Uuid],
    ) -> Result<Vec<Subscription>, RepoError>;
}

pub struct PgSubscriptionRepository {
    pool: Pool,
}

impl PgSubscriptionRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, user_id, plan_id, status, expires_at, created_at";

fn subscription_from_row(row: &Row) -> Result<Subscription, RepoError> {
    let status: String = row.try_get("status")?;
    Ok(Subscription {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        plan_id: row.try_get("plan_id")?,
        status: status.parse::<SubscriptionStatus>().map_err(RepoError::Corrupt)?,
        expires_at: row.try_get("expires_at")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn insert(&self, subscription: NewSubscription) -> Result<Subscription, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!(
            "INSERT INTO subscriptions (id, user_id, plan_id, status, expires_at, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            COLUMNS
        );
        let stmt = client.prepare_cached(&sql).await?;
        let row = client
            .query_one(
                &stmt,
                &[
                    &Uuid::new_v4(),
                    &subscription.user_id,
                    &subscription.plan_id,
                    &subscription.status.as_str(),
                    &subscription.expires_at,
                    &subscription.created_at,
                ],
            )
            .await?;
        subscription_from_row(&row)
    }

    async fn find(&self, user_id: Uuid, plan_id: Uuid) -> Result<Option<Subscription>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!(
            "SELECT {} FROM subscriptions WHERE user_id = $1 AND plan_id = $2",
            COLUMNS
        );
        let stmt = client.prepare_cached(&sql).await?;
        client
            .query_opt(&stmt, &[&user_id, &plan_id])
            .await?
            .as_ref()
            .map(subscription_from_row)
            .transpose()
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Subscription>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!(
            "SELECT {} FROM subscriptions WHERE user_id = $1 ORDER BY created_at DESC",
            COLUMNS
        );
        let stmt = client.prepare_cached(&sql).await?;
        let rows = client.query(&stmt, &[&user_id]).await?;
        rows.iter().map(subscription_from_row).collect()
    }

    async fn list_active_for_plans(
        &self,
        user_id: Uuid,
        plan_ids: &[Uuid],
    ) -> Result<Vec<Subscription>, RepoError> {
        if plan_ids.is_empty() {
            return Ok(Vec::new());
        }
        let client = self.pool.get().await?;
        let sql = format!(
            "SELECT {} FROM subscriptions \
             WHERE user_id = $1 AND plan_id = ANY($2) AND status = 'active'",
            COLUMNS
        );
        let stmt = client.prepare_cached(&sql).await?;
        let ids = plan_ids.to_vec();
        let rows = client.query(&stmt, &[&user_id, &ids]).await?;
        rows.iter().map(subscription_from_row).collect()
    }
}
