// src/services/feed_service.rs
use std::collections::HashSet;

use uuid::Uuid;

use crate::dtos::plan_dtos::PlanOut;
use crate::errors::ApiError;
use crate::repositories::Repositories;
use crate::services::plan_service::expand_trainers;

/// Plans by the trainers `user_id` follows, newest first, each flagged with
/// whether the user holds an active subscription to it. Content is not
/// gated here.
pub async fn build_feed(repos: &Repositories, user_id: Uuid) -> Result<Vec<PlanOut>, ApiError> {
    let trainer_ids: Vec<Uuid> = repos
        .follows
        .list_by_follower(user_id)
        .await?
        .into_iter()
        .map(|f| f.trainer_id)
        .collect();

    if trainer_ids.is_empty() {
        return Ok(Vec::new());
    }

    let plans = repos.plans.list_by_trainers(&trainer_ids).await?;
    let plan_ids: Vec<Uuid> = plans.iter().map(|p| p.id).collect();

    let subscribed: HashSet<Uuid> = repos
        .subscriptions
        .list_active_for_plans(user_id, &plan_ids)
        .await?
        .into_iter()
        .map(|s| s.plan_id)
        .collect();

    Ok(expand_trainers(repos, plans)
        .await?
        .into_iter()
        .map(|p| {
            let is_subscribed = subscribed.contains(&p.plan.id);
            PlanOut::full(p).with_subscription(is_subscribed)
        })
        .collect())
}
