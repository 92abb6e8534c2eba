// src/services/auth_services.rs
use std::sync::OnceLock;

use log::{error, info, warn};
use regex::Regex;

use crate::dtos::api_response::FieldError;
use crate::dtos::auth::{LoginIn, RegisterIn, SessionOut};
use crate::errors::ApiError;
use crate::models::user::{NewUser, Role, User};
use crate::repositories::{RepoError, Repositories};
use crate::services::token_service::{hash_password, verify_password, TokenService};

const MIN_PASSWORD_LEN: usize = 6;

fn looks_like_email(email: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email regex compiles")
    })
    .is_match(email)
}

/// Registration, login and bearer-token resolution.
#[derive(Clone)]
pub struct AuthService {
    repos: Repositories,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(repos: Repositories, tokens: TokenService) -> Self {
        Self { repos, tokens }
    }

    pub async fn register(&self, input: RegisterIn) -> Result<SessionOut, ApiError> {
        let name = input.name.as_deref().unwrap_or_default().trim().to_string();
        let email = input.email.as_deref().map(|e| e.trim().to_lowercase());
        let password = input.password.unwrap_or_default();

        let mut errors = Vec::new();
        if name.is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }
        match email.as_deref() {
            None | Some("") => errors.push(FieldError::new("email", "Email is required")),
            Some(e) if !looks_like_email(e) => {
                errors.push(FieldError::new("email", "Invalid email format"))
            }
            Some(_) => {}
        }
        if password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        } else if password.len() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                "password",
                "Password must be at least 6 characters long",
            ));
        }
        let role = match input.role.as_deref().map(str::trim) {
            None | Some("") => Some(Role::User),
            Some(r) => r.parse::<Role>().ok(),
        };
        if role.is_none() {
            errors.push(FieldError::new("role", "Role must be trainer or user"));
        }
        let (Some(role), Some(email)) = (role.filter(|_| errors.is_empty()), email) else {
            return Err(ApiError::Validation(errors));
        };

        let password_hash = hash_password(&password).map_err(|e| {
            error!("Failed to hash password: {}", e);
            ApiError::Internal
        })?;

        let user = self
            .repos
            .users
            .insert(NewUser {
                name,
                email,
                password_hash,
                role,
                bio: input.bio.unwrap_or_default(),
                avatar: input.avatar.unwrap_or_default(),
            })
            .await
            .map_err(|e| match e {
                RepoError::Conflict => ApiError::conflict("Email already exists. Please login instead."),
                other => other.into(),
            })?;

        info!("Registered {} {}", user.role, user.id);
        self.session_for(&user)
    }

    /// Unknown email and wrong password answer the same way.
    pub async fn login(&self, input: LoginIn) -> Result<SessionOut, ApiError> {
        let email = input.email.map(|e| e.trim().to_lowercase()).unwrap_or_default();
        let password = input.password.unwrap_or_default();

        let mut errors = Vec::new();
        if email.is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        }
        if password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        let user = self.repos.users.find_by_email(&email).await?;

        match user {
            Some(user) if verify_password(&password, &user.password_hash) => {
                self.session_for(&user)
            }
            _ => {
                warn!("Failed login for {}", email);
                Err(ApiError::unauthenticated("Invalid credentials"))
            }
        }
    }

    /// Resolves a bearer token to its user. A token whose user is gone is
    /// as invalid as a bad signature.
    pub async fn authenticate(&self, token: &str) -> Result<User, ApiError> {
        let user_id = self.tokens.verify(token).map_err(|e| {
            info!("Rejected token: {}", e);
            ApiError::unauthenticated("Invalid token")
        })?;

        self.repos
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::unauthenticated("User not found"))
    }

    fn session_for(&self, user: &User) -> Result<SessionOut, ApiError> {
        let token = self.tokens.issue(user).map_err(|e| {
            error!("Failed to issue token for {}: {}", user.id, e);
            ApiError::Internal
        })?;
        Ok(SessionOut {
            token,
            user: user.public(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(Repositories::in_memory(), TokenService::new("test-secret", 1))
    }

    fn register_in(email: &str, role: Option<&str>) -> RegisterIn {
        RegisterIn {
            name: Some("Mike Muscle".into()),
            email: Some(email.into()),
            password: Some("password123".into()),
            role: role.map(String::from),
            bio: None,
            avatar: None,
        }
    }

    #[tokio::test]
    async fn register_defaults_to_user_role_and_normalizes_email() {
        let svc = service();
        let session = svc.register(register_in(" Mike@Example.COM ", None)).await.unwrap();
        assert_eq!(session.user.role, Role::User);
        assert_eq!(session.user.email, "mike@example.com");

        let user = svc.authenticate(&session.token).await.unwrap();
        assert_eq!(user.id, session.user.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let svc = service();
        svc.register(register_in("a@b.co", Some("trainer"))).await.unwrap();
        let err = svc.register(register_in("A@b.co", None)).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn invalid_registration_lists_fields() {
        let err = service()
            .register(RegisterIn {
                name: Some(" ".into()),
                email: Some("nope".into()),
                password: Some("123".into()),
                role: Some("admin".into()),
                bio: None,
                avatar: None,
            })
            .await
            .unwrap_err();

        match err {
            ApiError::Validation(fields) => assert_eq!(fields.len(), 4),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_login_fields_are_listed_before_any_lookup() {
        let err = service().login(LoginIn::default()).await.unwrap_err();
        match err {
            ApiError::Validation(fields) => {
                let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, vec!["email", "password"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn login_checks_password() {
        let svc = service();
        svc.register(register_in("a@b.co", None)).await.unwrap();

        let ok = svc
            .login(LoginIn { email: Some("a@b.co".into()), password: Some("password123".into()) })
            .await;
        assert!(ok.is_ok());

        let wrong = svc
            .login(LoginIn { email: Some("a@b.co".into()), password: Some("nope".into()) })
            .await
            .unwrap_err();
        let unknown = svc
            .login(LoginIn { email: Some("x@b.co".into()), password: Some("password123".into()) })
            .await
            .unwrap_err();
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn garbage_token_is_unauthenticated() {
        let err = service().authenticate("abc").await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated(_)));
    }
}
