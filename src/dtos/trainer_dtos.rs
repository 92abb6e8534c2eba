use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::dtos::plan_dtos::PlanOut;
use crate::models::user::User;

/// Entry of the trainer directory.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerOut {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for TrainerOut {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            bio: u.bio.clone(),
            avatar: u.avatar.clone(),
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerProfileOut {
    pub trainer: TrainerOut,
    pub plans: Vec<PlanOut>,
    pub is_following: bool,
}
