use async_trait::async_trait;

use crate::shared::crud::PatchField;
use crate::user::application::domain::entities::{User, UserId};

//
// ──────────────────────────────────────────────────────────
// DTOs
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub username: Option<String>,
    pub hashed_password: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_verified: bool,
}

/// Partial profile/account update. `None` / `Unset` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub username: PatchField<String>,
    pub full_name: PatchField<String>,
    pub phone: PatchField<String>,
    pub avatar: PatchField<String>,
    pub bio: PatchField<String>,
    pub is_active: Option<bool>,
    pub is_superuser: Option<bool>,
    pub is_verified: Option<bool>,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

/// Unique column that rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    Username,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("{0:?} already in use")]
    Duplicate(UniqueField),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

//
// ──────────────────────────────────────────────────────────
// Port
// ──────────────────────────────────────────────────────────
//

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError>;

    async fn find_by_username(&self, username: &str)
        -> Result<Option<User>, UserRepositoryError>;

    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<User>, UserRepositoryError>;

    async fn count(&self) -> Result<u64, UserRepositoryError>;

    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    /// `Ok(None)` when the user does not exist.
    async fn update(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<Option<User>, UserRepositoryError>;

    async fn update_password(
        &self,
        id: UserId,
        hashed_password: String,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Stamps `last_login_at` and increments `login_count`.
    async fn record_login(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;
}
