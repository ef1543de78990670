use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use crate::auth::adapter::outgoing::jwt::JwtConfig;
use crate::shared::api::PageLimits;

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

//
// ──────────────────────────────────────────────────────────
// Variable sources
// ──────────────────────────────────────────────────────────
//

/// Lookup of configuration variables by name.
pub trait EnvSource {
    fn get(&self, var: &str) -> Option<String>;

    fn required(&self, var: &'static str) -> Result<String, ConfigError> {
        self.get(var)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(var))
    }

    fn or(&self, var: &'static str, default: &str) -> String {
        self.get(var).unwrap_or_else(|| default.to_string())
    }

    fn parsed_or<T>(&self, var: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(var) {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                var,
                reason: e.to_string(),
            }),
        }
    }
}

/// The process environment, after `.env` files have been loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, var: &str) -> Option<String> {
        std::env::var(var).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, var: &str) -> Option<String> {
        HashMap::get(self, var).cloned()
    }
}

/// Loads `.env.{RUST_ENV}` when present, otherwise `.env`. Missing files are
/// not an error.
pub fn load_env_files() {
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }
}

//
// ──────────────────────────────────────────────────────────
// Settings
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    pub pool_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub page_limits: PageLimits,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&ProcessEnv)
    }

    pub fn from_source(env: &impl EnvSource) -> Result<Self, ConfigError> {
        let environment = env
            .get("ENVIRONMENT")
            .or_else(|| env.get("RUST_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let database = DatabaseConfig {
            url: env.required("DATABASE_URL")?,
            pool_size: env.parsed_or("DATABASE_POOL_SIZE", 10)?,
            pool_timeout: Duration::from_secs(env.parsed_or("DATABASE_POOL_TIMEOUT", 30)?),
        };

        let page_limits = PageLimits {
            default_size: env.parsed_or("DEFAULT_PAGE_SIZE", 20)?,
            max_size: env.parsed_or("MAX_PAGE_SIZE", 100)?,
        };
        if page_limits.max_size == 0 || page_limits.default_size > page_limits.max_size {
            return Err(ConfigError::Invalid {
                var: "DEFAULT_PAGE_SIZE",
                reason: "must be between 1 and MAX_PAGE_SIZE".to_string(),
            });
        }

        let bcrypt_cost = env.parsed_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                var: "BCRYPT_COST",
                reason: "must be between 4 and 31".to_string(),
            });
        }

        Ok(Self {
            environment,
            host: env.or("HOST", "0.0.0.0"),
            port: env.parsed_or("PORT", 8000)?,
            database,
            jwt: JwtConfig::from_source(env)?,
            page_limits,
            bcrypt_cost,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
