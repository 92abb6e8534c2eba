// src/handlers/auth_handlers.rs
use actix_web::{get, post, web, HttpResponse};

use crate::dtos::api_response::ApiResponse;
use crate::dtos::auth::{LoginIn, RegisterIn};
use crate::errors::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::services::auth_services::AuthService;

/// POST /api/auth/register
#[post("/register")]
pub async fn register(
    svc: web::Data<AuthService>,
    body: web::Json<RegisterIn>,
) -> Result<HttpResponse, ApiError> {
    let session = svc.register(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Account created", session)))
}

/// POST /api/auth/login
#[post("/login")]
pub async fn login(
    svc: web::Data<AuthService>,
    body: web::Json<LoginIn>,
) -> Result<HttpResponse, ApiError> {
    let session = svc.login(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Login successful", session)))
}

/// GET /api/auth/me
#[get("/me")]
pub async fn me(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success("Profile retrieved successfully", user.public()))
}
