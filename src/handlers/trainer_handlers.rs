// src/handlers/trainer_handlers.rs
use actix_web::{get, web, HttpResponse};

use crate::AppState;
use crate::dtos::api_response::ApiResponse;
use crate::errors::ApiError;
use crate::handlers::parse_id;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::services::trainer_service;

/// GET /api/trainers
#[get("")]
pub async fn list_trainers(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let trainers = trainer_service::list(&state.repos).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Trainers retrieved successfully", trainers)))
}

/// GET /api/trainers/{id}
#[get("/{id}")]
pub async fn get_trainer(
    state: web::Data<AppState>,
    path: web::Path<String>,
    viewer: Option<AuthenticatedUser>,
) -> Result<HttpResponse, ApiError> {
    let trainer_id = parse_id(&path, "trainer")?;
    let profile = trainer_service::profile(&state.repos, trainer_id, viewer.as_deref()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Trainer retrieved successfully", profile)))
}
