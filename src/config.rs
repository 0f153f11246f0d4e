use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;

pub const DEFAULT_ADMIN_FALLBACK_HOST: &str = "https://admin.vacatures.nl";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
    pub public_api_base_url: Option<String>,
    pub admin_fallback_host: String,
    pub frontend_origin: Option<String>,
    pub environment: Environment,
    pub public_rps: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let environment = match env::var("APP_ENV").ok().as_deref() {
            Some("production") => Environment::Production,
            Some("development") | None => Environment::Development,
            Some(other) => {
                return Err(Error::Config(format!("Invalid value for APP_ENV: {}", other)));
            }
        };

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:8080"),
            database_url: get_env_opt("DATABASE_URL"),
            jwt_secret: get_env("JWT_SECRET")?,
            session_ttl_hours: get_env_parse_or("SESSION_TTL_HOURS", 24)?,
            public_api_base_url: get_env_opt("PUBLIC_API_BASE_URL"),
            admin_fallback_host: get_env_or("ADMIN_FALLBACK_HOST", DEFAULT_ADMIN_FALLBACK_HOST),
            frontend_origin: get_env_opt("FRONTEND_ORIGIN"),
            environment,
            public_rps: get_env_parse_or("PUBLIC_RPS", 20)?,
        })
    }

    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .ok_or_else(|| Error::Config("Missing environment variable: DATABASE_URL".to_string()))
    }

    /// Base URL the login form and server-side callers use to reach the API.
    /// An empty string means same-origin.
    pub fn api_base_url(&self) -> String {
        if let Some(base) = &self.public_api_base_url {
            return base.trim_end_matches('/').to_string();
        }
        match self.environment {
            Environment::Production => self.admin_fallback_host.trim_end_matches('/').to_string(),
            Environment::Development => String::new(),
        }
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_or(name: &str, default: &str) -> String {
    get_env_opt(name).unwrap_or_else(|| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_env_opt(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        None => Ok(default),
    }
}
