use async_trait::async_trait;
use bcrypt::{hash, verify, DEFAULT_COST};

use crate::user::application::ports::outgoing::{HashError, PasswordHasher};

#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|_| HashError::TaskFailed)?
            .map_err(|e| HashError::HashFailed(e.to_string()))
    }

    async fn verify_password(&self, password: &str, hashed: &str) -> Result<bool, HashError> {
        let password = password.to_string();
        let hashed = hashed.to_string();

        tokio::task::spawn_blocking(move || verify(password, &hashed))
            .await
            .map_err(|_| HashError::TaskFailed)?
            .map_err(|e| HashError::VerifyFailed(e.to_string()))
    }
}
