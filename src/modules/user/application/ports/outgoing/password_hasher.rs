use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HashError {
    #[error("Password hashing failed: {0}")]
    HashFailed(String),

    #[error("Password verification failed: {0}")]
    VerifyFailed(String),

    #[error("Hashing task did not complete")]
    TaskFailed,
}

/// One-way password hashing. Implementations are expected to be slow on
/// purpose, so both calls are async and run off the request thread.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, HashError>;

    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}
