// src/middleware/auth_extractor.rs
//
// Bearer-token extractors. Handlers that require an identity take
// `AuthenticatedUser`, `TrainerUser` or `MemberUser`; handlers that merely
// personalise take `Option<AuthenticatedUser>`, which turns any credential
// problem into `None`.

use std::ops::Deref;

use actix_web::http::header::AUTHORIZATION;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use log::error;

use crate::errors::ApiError;
use crate::models::user::{Role, User};
use crate::services::auth_services::AuthService;

/// A request whose bearer token resolved to a stored user.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
}

impl Deref for AuthenticatedUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.user
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthenticated("No token provided"))?
        .to_str()
        .map_err(|_| ApiError::unauthenticated("Invalid header format"))?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::unauthenticated("Invalid auth header format"))?;
    Ok(token.to_string())
}

fn authenticate(req: &HttpRequest) -> LocalBoxFuture<'static, Result<User, ApiError>> {
    let auth = req.app_data::<web::Data<AuthService>>().cloned();
    let token = bearer_token(req);

    Box::pin(async move {
        let auth = auth.ok_or_else(|| {
            error!("AuthService is not registered as app data");
            ApiError::Internal
        })?;
        let token = token?;
        auth.authenticate(&token).await
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let fut = authenticate(req);
        Box::pin(async move { Ok(AuthenticatedUser { user: fut.await? }) })
    }
}

fn with_role(
    req: &HttpRequest,
    role: Role,
    denied: &'static str,
) -> LocalBoxFuture<'static, Result<User, ApiError>> {
    let fut = authenticate(req);
    Box::pin(async move {
        let user = fut.await?;
        if user.role != role {
            return Err(ApiError::forbidden(denied));
        }
        Ok(user)
    })
}

/// Authenticated with role `trainer`.
#[derive(Debug, Clone)]
pub struct TrainerUser(pub User);

impl FromRequest for TrainerUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let fut = with_role(req, Role::Trainer, "Access denied. Trainer role required");
        Box::pin(async move { fut.await.map(TrainerUser) })
    }
}

/// Authenticated with role `user`.
#[derive(Debug, Clone)]
pub struct MemberUser(pub User);

impl FromRequest for MemberUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let fut = with_role(req, Role::User, "Access denied. User role required");
        Box::pin(async move { fut.await.map(MemberUser) })
    }
}
