// src/handlers/test_support.rs
use actix_web::web;

use crate::AppState;
use crate::dtos::auth::RegisterIn;
use crate::handlers::{configure, json_config};
use crate::models::user::UserPublic;
use crate::repositories::Repositories;
use crate::services::auth_services::AuthService;
use crate::services::token_service::TokenService;

/// In-memory backing for HTTP-level tests.
pub struct Harness {
    pub repos: Repositories,
    pub auth: AuthService,
}

impl Harness {
    pub fn new() -> Self {
        let repos = Repositories::in_memory();
        let auth = AuthService::new(repos.clone(), TokenService::new("test-secret", 24));
        Self { repos, auth }
    }

    pub fn mount(&self) -> impl FnOnce(&mut web::ServiceConfig) + 'static {
        let state = web::Data::new(AppState { repos: self.repos.clone() });
        let auth = web::Data::new(self.auth.clone());
        move |cfg| {
            cfg.app_data(state)
                .app_data(auth)
                .app_data(json_config())
                .configure(configure);
        }
    }

    /// Registers an account and returns it with a bearer token.
    pub async fn account(&self, name: &str, email: &str, role: &str) -> (UserPublic, String) {
        let session = self
            .auth
            .register(RegisterIn {
                name: Some(name.to_string()),
                email: Some(email.to_string()),
                password: Some("password123".to_string()),
                role: Some(role.to_string()),
                bio: None,
                avatar: None,
            })
            .await
            .expect("register test account");
        (session.user, format!("Bearer {}", session.token))
    }
}
