// src/services/plan_service.rs
use std::collections::HashMap;

use log::info;
use uuid::Uuid;

use crate::dtos::plan_dtos::{CreatePlanDTO, PlanOut, UpdatePlanDTO};
use crate::errors::ApiError;
use crate::models::plan::{Plan, PlanWithTrainer};
use crate::models::user::{PublicProfile, User};
use crate::repositories::Repositories;
use crate::services::access_gate::{render_plan, Viewer};

/// Resolves each plan's author to a public profile with one batched lookup.
pub async fn expand_trainers(
    repos: &Repositories,
    plans: Vec<Plan>,
) -> Result<Vec<PlanWithTrainer>, ApiError> {
    let mut ids: Vec<Uuid> = plans.iter().map(|p| p.trainer_id).collect();
    ids.sort();
    ids.dedup();

    let profiles: HashMap<Uuid, PublicProfile> = repos
        .users
        .find_many(&ids)
        .await?
        .iter()
        .map(|u| (u.id, u.profile()))
        .collect();

    Ok(plans
        .into_iter()
        .map(|plan| {
            let trainer = profiles.get(&plan.trainer_id).cloned();
            PlanWithTrainer { plan, trainer }
        })
        .collect())
}

async fn expand_one(repos: &Repositories, plan: Plan) -> Result<PlanWithTrainer, ApiError> {
    let mut expanded = expand_trainers(repos, vec![plan]).await?;
    expanded.pop().ok_or(ApiError::Internal)
}

/// Every plan, content included, no subscription flag.
pub async fn list_all(repos: &Repositories) -> Result<Vec<PlanOut>, ApiError> {
    let plans = repos.plans.list_all().await?;
    Ok(expand_trainers(repos, plans)
        .await?
        .into_iter()
        .map(PlanOut::full)
        .collect())
}

pub async fn list_by_trainer(repos: &Repositories, trainer_id: Uuid) -> Result<Vec<PlanOut>, ApiError> {
    let plans = repos.plans.list_by_trainers(&[trainer_id]).await?;
    Ok(expand_trainers(repos, plans)
        .await?
        .into_iter()
        .map(PlanOut::full)
        .collect())
}

/// Single plan through the access gate.
pub async fn get_for_viewer(
    repos: &Repositories,
    plan_id: Uuid,
    viewer: Option<&User>,
) -> Result<PlanOut, ApiError> {
    let plan = repos
        .plans
        .find_by_id(plan_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Plan not found"))?;

    let viewer = match viewer {
        Some(user) => {
            let has_active_subscription = repos
                .subscriptions
                .find(user.id, plan.id)
                .await?
                .is_some_and(|s| s.is_active());
            Some(Viewer { user_id: user.id, has_active_subscription })
        }
        None => None,
    };

    let expanded = expand_one(repos, plan).await?;
    Ok(render_plan(expanded, viewer.as_ref()))
}

pub async fn create(repos: &Repositories, trainer: &User, dto: CreatePlanDTO) -> Result<PlanOut, ApiError> {
    let new_plan = dto.validate(trainer.id).map_err(ApiError::Validation)?;
    let plan = repos.plans.insert(new_plan).await?;
    info!("Trainer {} created plan {}", trainer.id, plan.id);
    Ok(PlanOut::full(expand_one(repos, plan).await?))
}

async fn owned_plan(repos: &Repositories, plan_id: Uuid, trainer: &User, action: &str) -> Result<Plan, ApiError> {
    let plan = repos
        .plans
        .find_by_id(plan_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Plan not found"))?;
    if !plan.is_owned_by(trainer.id) {
        return Err(ApiError::NotOwner(format!("Not authorized to {} this plan", action)));
    }
    Ok(plan)
}

pub async fn update(
    repos: &Repositories,
    trainer: &User,
    plan_id: Uuid,
    dto: UpdatePlanDTO,
) -> Result<PlanOut, ApiError> {
    let changes = dto.validate().map_err(ApiError::Validation)?;
    let current = owned_plan(repos, plan_id, trainer, "update").await?;
    if changes.is_empty() {
        return Ok(PlanOut::full(expand_one(repos, current).await?));
    }

    let plan = repos
        .plans
        .update(plan_id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Plan not found"))?;
    info!("Trainer {} updated plan {}", trainer.id, plan.id);
    Ok(PlanOut::full(expand_one(repos, plan).await?))
}

/// Subscriptions to the plan are left in place.
pub async fn delete(repos: &Repositories, trainer: &User, plan_id: Uuid) -> Result<(), ApiError> {
    owned_plan(repos, plan_id, trainer, "delete").await?;
    if !repos.plans.delete(plan_id).await? {
        return Err(ApiError::not_found("Plan not found"));
    }
    info!("Trainer {} deleted plan {}", trainer.id, plan_id);
    Ok(())
}
