use std::env;
use anyhow::{Context, Result};
use deadpool_postgres::{Config, Pool, Runtime};
use tokio_postgres::NoTls;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TOKEN_HOURS: i64 = 168;
const MAX_TOKEN_HOURS: i64 = 24 * 365;
const DEFAULT_POOL_SIZE: usize = 16;
const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Which store backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub store: StoreKind,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_secret = get("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .context("JWT_SECRET not set")?;

        let jwt_ttl_hours = match get("JWT_EXPIRES_HOURS") {
            Some(v) => v
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|h| (1..=MAX_TOKEN_HOURS).contains(h))
                .with_context(|| format!("JWT_EXPIRES_HOURS must be between 1 and {} hours", MAX_TOKEN_HOURS))?,
            None => DEFAULT_TOKEN_HOURS,
        };

        let port = match get("PORT") {
            Some(v) => v.parse().context("PORT must be a port number")?,
            None => DEFAULT_PORT,
        };

        let allowed_origins = get("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        let store = match get("STORE").as_deref() {
            Some("memory") => StoreKind::Memory,
            _ => StoreKind::Postgres,
        };

        Ok(Self { jwt_secret, jwt_ttl_hours, port, allowed_origins, store })
    }
}

pub fn get_pg_pool() -> Result<Pool> {
    let mut cfg = Config::new();
    cfg.host = Some(env::var("PG_HOST").context("PG_HOST not set")?);
    cfg.user = Some(env::var("PG_USER").context("PG_USER not set")?);
    cfg.password = env::var("PG_PASS").ok();
    cfg.dbname = Some(env::var("PG_DB").context("PG_DB not set")?);

    let max_size = match env::var("PG_POOL_SIZE") {
        Ok(v) => v.parse().context("PG_POOL_SIZE must be a positive number")?,
        Err(_) => DEFAULT_POOL_SIZE,
    };
    let mut pool = cfg.pool.unwrap_or_default();
    pool.max_size = max_size;
    cfg.pool = Some(pool);

    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
       .context("failed to create postgres pool")
}
