// src/errors.rs
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

use crate::dtos::api_response::{ApiResponse, FieldError};
use crate::repositories::RepoError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    BadRequest(String),
    /// Missing or invalid credential.
    #[error("{0}")]
    Unauthenticated(String),
    /// Authenticated, but with the wrong role.
    #[error("{0}")]
    Forbidden(String),
    /// Right role, but the record belongs to someone else.
    #[error("{0}")]
    NotOwner(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Server error")]
    Internal,
}

impl ApiError {
    pub fn bad_request(msg: &str) -> Self {
        ApiError::BadRequest(msg.to_string())
    }

    pub fn unauthenticated(msg: &str) -> Self {
        ApiError::Unauthenticated(msg.to_string())
    }

    pub fn forbidden(msg: &str) -> Self {
        ApiError::Forbidden(msg.to_string())
    }

    pub fn not_owner(msg: &str) -> Self {
        ApiError::NotOwner(msg.to_string())
    }

    pub fn not_found(msg: &str) -> Self {
        ApiError::NotFound(msg.to_string())
    }

    pub fn conflict(msg: &str) -> Self {
        ApiError::Conflict(msg.to_string())
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        match e {
            // Callers that care translate conflicts themselves; this is the
            // catch-all for the rest.
            RepoError::Conflict => ApiError::conflict("Resource already exists"),
            other => {
                error!("store failure: {}", other);
                ApiError::Internal
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) | ApiError::NotOwner(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let errors = match self {
            ApiError::Validation(fields) => Some(fields.clone()),
            _ => None,
        };
        HttpResponse::build(self.status_code()).json(ApiResponse::error(self.to_string(), errors))
    }
}
