use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::plan::Plan;
use crate::models::subscription::{Subscription, SubscriptionStatus};
use crate::models::user::PublicProfile;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeIn {
    pub plan_id: Option<String>,
}

/// Plan summary carried by a subscription. The gated content is not part of it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribedPlanOut {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub duration: i32,
    pub image: String,
    pub trainer: Option<PublicProfile>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionOut {
    pub id: Uuid,
    pub user: Uuid,
    pub plan: SubscribedPlanOut,
    pub status: SubscriptionStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl SubscriptionOut {
    pub fn new(sub: Subscription, plan: Plan, trainer: Option<PublicProfile>) -> Self {
        Self {
            id: sub.id,
            user: sub.user_id,
            plan: SubscribedPlanOut {
                id: plan.id,
                title: plan.title,
                description: plan.description,
                price: plan.price,
                duration: plan.duration,
                image: plan.image,
                trainer,
            },
            status: sub.status,
            expires_at: sub.expires_at,
            created_at: sub.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IsSubscribedOut {
    pub is_subscribed: bool,
}
