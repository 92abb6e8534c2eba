// src/repositories/user_repository.rs
use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::models::user::{NewUser, Role, User};
use crate::repositories::RepoError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `RepoError::Conflict` when the email is taken.
    async fn insert(&self, user: NewUser) -> Result<User, RepoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;
    /// Trainers, newest first.
    async fn list_trainers(&self) -> Result<Vec<User>, RepoError>;
}

pub struct PgUserRepository {
    pool: Pool,
}

impl PgUserRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, name, email, password_hash, role, bio, avatar, created_at";

fn user_from_row(row: &Row) -> Result<User, RepoError> {
    let role: String = row.try_get("role")?;
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        role: role.parse::<Role>().map_err(RepoError::Corrupt)?,
        bio: row.try_get("bio")?,
        avatar: row.try_get("avatar")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!(
            "INSERT INTO users (id, name, email, password_hash, role, bio, avatar) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            COLUMNS
        );
        let stmt = client.prepare_cached(&sql).await?;
        let row = client
            .query_one(
                &stmt,
                &[
                    &Uuid::new_v4(),
                    &user.name,
                    &user.email,
                    &user.password_hash,
                    &user.role.as_str(),
                    &user.bio,
                    &user.avatar,
                ],
            )
            .await?;
        user_from_row(&row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {} FROM users WHERE id = $1", COLUMNS);
        let stmt = client.prepare_cached(&sql).await?;
        client
            .query_opt(&stmt, &[&id])
            .await?
            .as_ref()
            .map(user_from_row)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {} FROM users WHERE email = $1", COLUMNS);
        let stmt = client.prepare_cached(&sql).await?;
        client
            .query_opt(&stmt, &[&email])
            .await?
            .as_ref()
            .map(user_from_row)
            .transpose()
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let client = self.pool.get().await?;
        let sql = format!("SELECT {} FROM users WHERE id = ANY($1)", COLUMNS);
        let stmt = client.prepare_cached(&sql).await?;
        let ids = ids.to_vec();
        let rows = client.query(&stmt, &[&ids]).await?;
        rows.iter().map(user_from_row).collect()
    }

    async fn list_trainers(&self) -> Result<Vec<User>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!(
            "SELECT {} FROM users WHERE role = 'trainer' ORDER BY created_at DESC",
            COLUMNS
        );
        let stmt = client.prepare_cached(&sql).await?;
        let rows = client.query(&stmt, &[]).await?;
        rows.iter().map(user_from_row).collect()
    }
}
