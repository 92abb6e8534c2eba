// src/repositories/mod.rs
pub mod follow_repository;
pub mod memory_store;
pub mod plan_repository;
pub mod schema;
pub mod subscription_repository;
pub mod user_repository;

use std::sync::Arc;

use deadpool_postgres::Pool;
use thiserror::Error;
use tokio_postgres::error::SqlState;

pub use follow_repository::{FollowRepository, PgFollowRepository};
pub use memory_store::MemoryStore;
pub use plan_repository::{PgPlanRepository, PlanRepository};
pub use subscription_repository::{PgSubscriptionRepository, SubscriptionRepository};
pub use user_repository::{PgUserRepository, UserRepository};

#[derive(Debug, Error)]
pub enum RepoError {
    /// A unique index rejected the write.
    #[error("unique constraint violated")]
    Conflict,
    #[error("pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),
    #[error("database error: {0}")]
    Db(tokio_postgres::Error),
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

impl From<tokio_postgres::Error> for RepoError {
    fn from(e: tokio_postgres::Error) -> Self {
        if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
            RepoError::Conflict
        } else {
            RepoError::Db(e)
        }
    }
}

/// Every store the handlers need, behind trait objects so the backing
/// engine can be swapped.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub plans: Arc<dyn PlanRepository>,
    pub follows: Arc<dyn FollowRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
}

impl Repositories {
    pub fn postgres(pool: Pool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            plans: Arc::new(PgPlanRepository::new(pool.clone())),
            follows: Arc::new(PgFollowRepository::new(pool.clone())),
            subscriptions: Arc::new(PgSubscriptionRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        let store = MemoryStore::default();
        Self {
            users: Arc::new(store.clone()),
            plans: Arc::new(store.clone()),
            follows: Arc::new(store.clone()),
            subscriptions: Arc::new(store),
        }
    }
}
