// src/handlers/follow_handlers.rs
use actix_web::{delete, get, post, web, HttpResponse};

use crate::AppState;
use crate::dtos::api_response::ApiResponse;
use crate::dtos::follow_dtos::IsFollowingOut;
use crate::errors::ApiError;
use crate::handlers::parse_id;
use crate::middleware::auth_extractor::{AuthenticatedUser, MemberUser};
use crate::services::follow_service;

/// GET /api/follow
#[get("")]
pub async fn list_following(
    state: web::Data<AppState>,
    MemberUser(user): MemberUser,
) -> Result<HttpResponse, ApiError> {
    let trainers = follow_service::list_followed(&state.repos, user.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Followed trainers retrieved successfully", trainers)))
}

/// POST /api/follow/{trainer_id}
#[post("/{trainer_id}")]
pub async fn follow_trainer(
    state: web::Data<AppState>,
    MemberUser(user): MemberUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let trainer_id = parse_id(&path, "trainer")?;
    let follow = follow_service::follow(&state.repos, &user, trainer_id).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Trainer followed successfully", follow)))
}

/// DELETE /api/follow/{trainer_id}
#[delete("/{trainer_id}")]
pub async fn unfollow_trainer(
    state: web::Data<AppState>,
    MemberUser(user): MemberUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let trainer_id = parse_id(&path, "trainer")?;
    follow_service::unfollow(&state.repos, &user, trainer_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Trainer unfollowed successfully", ())))
}

/// GET /api/follow/{trainer_id}
#[get("/{trainer_id}")]
pub async fn check_following(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let trainer_id = parse_id(&path, "trainer")?;
    let is_following = follow_service::is_following(&state.repos, user.id, trainer_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Follow status retrieved",
        IsFollowingOut { is_following },
    )))
}
