// src/services/subscription_service.rs
use std::collections::HashMap;

use chrono::Utc;
use log::{error, info};
use uuid::Uuid;

use crate::dtos::subscription_dtos::SubscriptionOut;
use crate::errors::ApiError;
use crate::models::plan::Plan;
use crate::models::subscription::NewSubscription;
use crate::models::user::User;
use crate::repositories::{RepoError, Repositories};
use crate::services::plan_service::expand_trainers;

const ALREADY_SUBSCRIBED: &str = "Already subscribed to this plan";

/// Records a purchase. There is no payment step; the subscription is active
/// immediately and runs for the plan's duration.
pub async fn subscribe(repos: &Repositories, user: &User, plan_id: Uuid) -> Result<SubscriptionOut, ApiError> {
    let plan = repos
        .plans
        .find_by_id(plan_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Plan not found"))?;

    if let Some(existing) = repos.subscriptions.find(user.id, plan_id).await? {
        if existing.is_active() {
            return Err(ApiError::conflict(ALREADY_SUBSCRIBED));
        }
    }

    // An expired or cancelled record is not reset, so the insert below hits
    // the unique index and reports the same conflict.
    let record = NewSubscription::active(user.id, plan_id, Some(&plan), Utc::now()).map_err(|e| {
        error!("Plan {} has duration {}: {}", plan_id, plan.duration, e);
        ApiError::bad_request("Plan duration is out of range")
    })?;
    let subscription = repos
        .subscriptions
        .insert(record)
        .await
        .map_err(|e| match e {
            RepoError::Conflict => ApiError::conflict(ALREADY_SUBSCRIBED),
            other => other.into(),
        })?;

    info!(
        "User {} subscribed to plan {} until {}",
        user.id, plan_id, subscription.expires_at
    );

    let mut expanded = expand_trainers(repos, vec![plan]).await?;
    let plan = expanded.pop().ok_or(ApiError::Internal)?;
    Ok(SubscriptionOut::new(subscription, plan.plan, plan.trainer))
}

/// The user's subscriptions, newest first. Records whose plan has been
/// deleted are dropped.
pub async fn list_for_user(repos: &Repositories, user_id: Uuid) -> Result<Vec<SubscriptionOut>, ApiError> {
    let subscriptions = repos.subscriptions.list_by_user(user_id).await?;
    let plan_ids: Vec<Uuid> = subscriptions.iter().map(|s| s.plan_id).collect();
    let plans: Vec<Plan> = repos.plans.find_many(&plan_ids).await?;

    let mut by_id: HashMap<Uuid, _> = expand_trainers(repos, plans)
        .await?
        .into_iter()
        .map(|p| (p.plan.id, p))
        .collect();

    Ok(subscriptions
        .into_iter()
        .filter_map(|s| {
            // a plan may back only one subscription per user
            let p = by_id.remove(&s.plan_id)?;
            Some(SubscriptionOut::new(s, p.plan, p.trainer))
        })
        .collect())
}

/// True only for an active record.
pub async fn is_subscribed(repos: &Repositories, user_id: Uuid, plan_id: Uuid) -> Result<bool, ApiError> {
    Ok(repos
        .subscriptions
        .find(user_id, plan_id)
        .await?
        .is_some_and(|s| s.is_active()))
}
