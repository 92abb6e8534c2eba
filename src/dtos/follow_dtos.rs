use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::user::PublicProfile;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowOut {
    pub id: Uuid,
    pub follower: Uuid,
    pub trainer: PublicProfile,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IsFollowingOut {
    pub is_following: bool,
}
