// src/handlers/subscription_handlers.rs
use actix_web::{get, post, web, HttpResponse};

use crate::AppState;
use crate::dtos::api_response::ApiResponse;
use crate::dtos::subscription_dtos::{IsSubscribedOut, SubscribeIn};
use crate::errors::ApiError;
use crate::handlers::parse_id;
use crate::middleware::auth_extractor::{AuthenticatedUser, MemberUser};
use crate::services::subscription_service;

/// POST /api/subscriptions
/// Body: { "planId": "<uuid>" }
#[post("")]
pub async fn subscribe(
    state: web::Data<AppState>,
    MemberUser(user): MemberUser,
    body: web::Json<SubscribeIn>,
) -> Result<HttpResponse, ApiError> {
    let raw = body
        .into_inner()
        .plan_id
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Plan ID is required"))?;
    let plan_id = parse_id(&raw, "plan")?;

    let sub = subscription_service::subscribe(&state.repos, &user, plan_id).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Subscribed successfully", sub)))
}

/// GET /api/subscriptions
#[get("")]
pub async fn list_subscriptions(
    state: web::Data<AppState>,
    MemberUser(user): MemberUser,
) -> Result<HttpResponse, ApiError> {
    let subs = subscription_service::list_for_user(&state.repos, user.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Subscriptions retrieved successfully", subs)))
}

/// GET /api/subscriptions/{plan_id}
/// Any role may ask; trainers simply get `false`.
#[get("/{plan_id}")]
pub async fn check_subscription(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let plan_id = parse_id(&path, "plan")?;
    let is_subscribed = subscription_service::is_subscribed(&state.repos, user.id, plan_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Subscription status retrieved",
        IsSubscribedOut { is_subscribed },
    )))
}
