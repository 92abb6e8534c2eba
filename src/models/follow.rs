use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Edge from a user to a trainer they follow.
#[derive(Debug, Clone, PartialEq)]
pub struct Follow {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub trainer_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewFollow {
    pub follower_id: Uuid,
    pub trainer_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfFollow;

impl NewFollow {
    /// Builds the edge, refusing a user following themselves.
    pub fn new(follower_id: Uuid, trainer_id: Uuid) -> Result<Self, SelfFollow> {
        if follower_id == trainer_id {
            return Err(SelfFollow);
        }
        Ok(Self {
            follower_id,
            trainer_id,
        })
    }
}
