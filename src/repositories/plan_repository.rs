// src/repositories/plan_repository.rs
use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::models::plan::{NewPlan, Plan, PlanChanges};
use crate::repositories::RepoError;

/// Listing methods return plans newest first.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn insert(&self, plan: NewPlan) -> Result<Plan, RepoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Plan>, RepoError>;
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Plan>, RepoError>;
    async fn list_all(&self) -> Result<Vec<Plan>, RepoError>;
    async fn list_by_trainers(&self, trainer_ids: &[Uuid]) -> Result<Vec<Plan>, RepoError>;
    /// Returns `None` when no plan has this id.
    async fn update(&self, id: Uuid, changes: PlanChanges) -> Result<Option<Plan>, RepoError>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, RepoError>;
}

pub struct PgPlanRepository {
    pool: Pool,
}

impl PgPlanRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str =
    "id, title, description, price, duration, trainer_id, content, image, created_at, updated_at";

fn plan_from_row(row: &Row) -> Result<Plan, RepoError> {
    Ok(Plan {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        duration: row.try_get("duration")?,
        trainer_id: row.try_get("trainer_id")?,
        content: row.try_get("content")?,
        image: row.try_get("image")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl PlanRepository for PgPlanRepository {
    async fn insert(&self, plan: NewPlan) -> Result<Plan, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!(
            "INSERT INTO plans (id, title, description, price, duration, trainer_id, content, image) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            COLUMNS
        );
        let stmt = client.prepare_cached(&sql).await?;
        let row = client
            .query_one(
                &stmt,
                &[
                    &Uuid::new_v4(),
                    &plan.title,
                    &plan.description,
                    &plan.price,
                    &plan.duration,
                    &plan.trainer_id,
                    &plan.content,
                    &plan.image,
                ],
            )
            .await?;
        plan_from_row(&row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Plan>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {} FROM plans WHERE id = $1", COLUMNS);
        let stmt = client.prepare_cached(&sql).await?;
        client
            .query_opt(&stmt, &[&id])
            .await?
            .as_ref()
            .map(plan_from_row)
            .transpose()
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Plan>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let client = self.pool.get().await?;
        let sql = format!("SELECT {} FROM plans WHERE id = ANY($1)", COLUMNS);
        let stmt = client.prepare_cached(&sql).await?;
        let ids = ids.to_vec();
        let rows = client.query(&stmt, &[&ids]).await?;
        rows.iter().map(plan_from_row).collect()
    }

    async fn list_all(&self) -> Result<Vec<Plan>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {} FROM plans ORDER BY created_at DESC", COLUMNS);
        let stmt = client.prepare_cached(&sql).await?;
        let rows = client.query(&stmt, &[]).await?;
        rows.iter().map(plan_from_row).collect()
    }

    async fn list_by_trainers(&self, trainer_ids: &[Uuid]) -> Result<Vec<Plan>, RepoError> {
        if trainer_ids.is_empty() {
            return Ok(Vec::new());
        }
        let client = self.pool.get().await?;
        let sql = format!(
            "SELECT {} FROM plans WHERE trainer_id = ANY($1) ORDER BY created_at DESC",
            COLUMNS
        );
        let stmt = client.prepare_cached(&sql).await?;
        let ids = trainer_ids.to_vec();
        let rows = client.query(&stmt, &[&ids]).await?;
        rows.iter().map(plan_from_row).collect()
    }

    async fn update(&self, id: Uuid, changes: PlanChanges) -> Result<Option<Plan>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!(
            "UPDATE plans SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                price = COALESCE($4, price), \
                duration = COALESCE($5, duration), \
                content = COALESCE($6, content), \
                image = COALESCE($7, image), \
                updated_at = now() \
             WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        let stmt = client.prepare_cached(&sql).await?;
        client
            .query_opt(
                &stmt,
                &[
                    &id,
                    &changes.title,
                    &changes.description,
                    &changes.price,
                    &changes.duration,
                    &changes.content,
                    &changes.image,
                ],
            )
            .await?
            .as_ref()
            .map(plan_from_row)
            .transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let client = self.pool.get().await?;
        let stmt = client.prepare_cached("DELETE FROM plans WHERE id = $1").await?;
        let removed = client.execute(&stmt, &[&id]).await?;
        Ok(removed > 0)
    }
}
