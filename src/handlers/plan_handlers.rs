// src/handlers/plan_handlers.rs
use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::AppState;
use crate::dtos::api_response::ApiResponse;
use crate::dtos::plan::{CreatePlanDTO, UpdatePlanDTO};
use crate::errors::ApiError;
use crate::handlers::parse_id;
use crate::middleware::auth_extractor::{AuthenticatedUser, TrainerUser};
use crate::services::plan_service;

/// GET /api/plans
/// Public. Content is not gated in the listing.
#[get("")]
pub async fn list_plans(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let plans = plan_service::list_all(&state.repos).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Plans retrieved successfully", plans)))
}

/// GET /api/plans/trainer/my-plans
#[get("/trainer/my-plans")]
pub async fn my_plans(
    state: web::Data<AppState>,
    TrainerUser(trainer): TrainerUser,
) -> Result<HttpResponse, ApiError> {
    let plans = plan_service::list_by_trainer(&state.repos, trainer.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Plans retrieved successfully", plans)))
}

/// GET /api/plans/{id}
/// Public; a valid token may unlock the content. A bad token is treated as
/// no token.
#[get("/{id}")]
pub async fn get_plan(
    state: web::Data<AppState>,
    path: web::Path<String>,
    viewer: Option<AuthenticatedUser>,
) -> Result<HttpResponse, ApiError> {
    let plan_id = parse_id(&path, "plan")?;
    let plan = plan_service::get_for_viewer(&state.repos, plan_id, viewer.as_deref()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Plan retrieved successfully", plan)))
}

/// POST /api/plans
#[post("")]
pub async fn create_plan(
    state: web::Data<AppState>,
    TrainerUser(trainer): TrainerUser,
    body: web::Json<CreatePlanDTO>,
) -> Result<HttpResponse, ApiError> {
    let plan = plan_service::create(&state.repos, &trainer, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Plan created successfully", plan)))
}

/// PUT /api/plans/{id}
#[put("/{id}")]
pub async fn update_plan(
    state: web::Data<AppState>,
    TrainerUser(trainer): TrainerUser,
    path: web::Path<String>,
    body: web::Json<UpdatePlanDTO>,
) -> Result<HttpResponse, ApiError> {
    let plan_id = parse_id(&path, "plan")?;
    let plan = plan_service::update(&state.repos, &trainer, plan_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Plan updated successfully", plan)))
}

/// DELETE /api/plans/{id}
#[delete("/{id}")]
pub async fn delete_plan(
    state: web::Data<AppState>,
    TrainerUser(trainer): TrainerUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let plan_id = parse_id(&path, "plan")?;
    plan_service::delete(&state.repos, &trainer, plan_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Plan deleted successfully", ())))
}
