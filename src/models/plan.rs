use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::user::PublicProfile;

#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    /// Length of access in days.
    pub duration: i32,
    pub trainer_id: Uuid,
    /// Gated text, only shown to subscribers and the owning trainer.
    pub content: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPlan {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub duration: i32,
    pub trainer_id: Uuid,
    pub content: String,
    pub image: String,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct PlanChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration: Option<i32>,
    pub content: Option<String>,
    pub image: Option<String>,
}

impl PlanChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.duration.is_none()
            && self.content.is_none()
            && self.image.is_none()
    }
}

impl Plan {
    pub fn apply(&mut self, changes: PlanChanges, now: DateTime<Utc>) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(duration) = changes.duration {
            self.duration = duration;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(image) = changes.image {
            self.image = image;
        }
        self.updated_at = now;
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.trainer_id == user_id
    }
}

/// A plan with its author resolved. `trainer` is `None` when the author
/// record no longer resolves.
#[derive(Debug, Clone)]
pub struct PlanWithTrainer {
    pub plan: Plan,
    pub trainer: Option<PublicProfile>,
}
