// src/main.rs
mod config;
mod dtos;
mod errors;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod services;

use actix_web::{App, HttpServer, web, middleware::Logger};
use actix_cors::Cors;
use log::{info, error};

use crate::config::{AppConfig, StoreKind};
use crate::repositories::{schema, Repositories};
use crate::services::auth_services::AuthService;
use crate::services::token_service::TokenService;

/// Keeps four characters at each end of a secret for log lines.
fn mask_key(k: &str) -> String {
    let chars: Vec<char> = k.chars().collect();
    if chars.len() <= 8 {
        return "[REDACTED]".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
}

async fn open_store(kind: StoreKind) -> anyhow::Result<Repositories> {
    match kind {
        StoreKind::Memory => {
            info!("Using in-memory store; data is lost on shutdown");
            Ok(Repositories::in_memory())
        }
        StoreKind::Postgres => {
            let pool = config::get_pg_pool()?;
            schema::apply(&pool).await?;
            Ok(Repositories::postgres(pool))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };
    info!("JWT secret: {}", mask_key(&cfg.jwt_secret));

    let repos = match open_store(cfg.store).await {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to open store: {:#}", e);
            std::process::exit(1);
        }
    };

    let auth_service = AuthService::new(
        repos.clone(),
        TokenService::new(&cfg.jwt_secret, cfg.jwt_ttl_hours),
    );
    let auth_data = web::Data::new(auth_service);
    let state = web::Data::new(AppState { repos });

    let allowed_origins = cfg.allowed_origins.clone();
    let bind_address = format!("0.0.0.0:{}", cfg.port);
    info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec!["authorization", "content-type", "accept"])
            .supports_credentials()
            .max_age(3600);

        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(auth_data.clone())
            .app_data(handlers::json_config())
            .configure(handlers::configure)
    })
    .bind(&bind_address)?
    .run()
    .await
}
