use crate::config::{ConfigError, EnvSource};

pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub access_token_expiry: i64,         // seconds
    pub refresh_token_expiry: i64,        // seconds
    pub password_reset_token_expiry: i64, // seconds
}

impl JwtConfig {
    /// Reads `SECRET_KEY`, `ACCESS_TOKEN_EXPIRE_MINUTES`,
    /// `REFRESH_TOKEN_EXPIRE_DAYS` and `EMAIL_RESET_TOKEN_EXPIRE_HOURS`.
    pub fn from_source(env: &impl EnvSource) -> Result<Self, ConfigError> {
        let secret_key = env.required("SECRET_KEY")?;

        // HS256 needs at least 32 bytes of key material
        if secret_key.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid {
                var: "SECRET_KEY",
                reason: format!("must be at least {MIN_SECRET_LEN} characters"),
            });
        }

        let access_minutes: i64 = env.parsed_or("ACCESS_TOKEN_EXPIRE_MINUTES", 30)?;
        let refresh_days: i64 = env.parsed_or("REFRESH_TOKEN_EXPIRE_DAYS", 7)?;
        let reset_hours: i64 = env.parsed_or("EMAIL_RESET_TOKEN_EXPIRE_HOURS", 48)?;

        if access_minutes <= 0 {
            return Err(ConfigError::Invalid {
                var: "ACCESS_TOKEN_EXPIRE_MINUTES",
                reason: "must be positive".to_string(),
            });
        }

        let config = Self {
            secret_key,
            access_token_expiry: access_minutes * 60,
            refresh_token_expiry: refresh_days * 24 * 60 * 60,
            password_reset_token_expiry: reset_hours * 60 * 60,
        };

        if config.refresh_token_expiry <= config.access_token_expiry {
            return Err(ConfigError::Invalid {
                var: "REFRESH_TOKEN_EXPIRE_DAYS",
                reason: "refresh tokens must outlive access tokens".to_string(),
            });
        }

        Ok(config)
    }
}
