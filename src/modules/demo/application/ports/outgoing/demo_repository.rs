use async_trait::async_trait;

use crate::demo::application::domain::entities::{Demo, DemoId, DemoStatus};
use crate::shared::crud::PatchField;
use crate::user::application::domain::entities::UserId;

//
// ──────────────────────────────────────────────────────────
// DTOs
// ──────────────────────────────────────────────────────────
//

/// Search criteria combined with AND. Deleted rows never match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoSearch {
    /// Substring match on the name.
    pub name: Option<String>,
    pub status: Option<DemoStatus>,
    pub is_featured: Option<bool>,
    pub owner_id: Option<UserId>,
}

impl DemoSearch {
    pub fn owned_by(owner_id: UserId) -> Self {
        Self {
            owner_id: Some(owner_id),
            ..Default::default()
        }
    }

    pub fn featured() -> Self {
        Self {
            is_featured: Some(true),
            ..Default::default()
        }
    }

    pub fn with_status(status: DemoStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDemo {
    pub name: String,
    pub description: Option<String>,
    pub status: DemoStatus,
    pub priority: i32,
    pub is_featured: bool,
    pub owner_id: UserId,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoChanges {
    pub name: Option<String>,
    pub description: PatchField<String>,
    pub status: Option<DemoStatus>,
    pub priority: Option<i32>,
    pub is_featured: Option<bool>,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DemoRepositoryError {
    #[error("Demo name already in use")]
    Duplicate,

    #[error("Corrupt demo row {id}: {reason}")]
    CorruptRow { id: i64, reason: String },

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
pub trait DemoRepository: Send + Sync {
    /// Direct lookup; soft-deleted rows are returned too.
    async fn find_by_id(&self, id: DemoId) -> Result<Option<Demo>, DemoRepositoryError>;

    /// Exact name among non-deleted demos.
    async fn find_by_name(&self, name: &str) -> Result<Option<Demo>, DemoRepositoryError>;

    /// Highest priority first.
    async fn search(
        &self,
        criteria: &DemoSearch,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Demo>, DemoRepositoryError>;

    async fn count(&self, criteria: &DemoSearch) -> Result<u64, DemoRepositoryError>;

    async fn list_by_owner(
        &self,
        owner_id: UserId,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Demo>, DemoRepositoryError>;

    async fn list_featured(&self, skip: u64, limit: u64) -> Result<Vec<Demo>, DemoRepositoryError>;

    async fn count_by_status(&self, status: DemoStatus) -> Result<u64, DemoRepositoryError>;

    async fn create(&self, demo: NewDemo) -> Result<Demo, DemoRepositoryError>;

    /// `Ok(None)` when the demo does not exist.
    async fn update(
        &self,
        id: DemoId,
        changes: DemoChanges,
    ) -> Result<Option<Demo>, DemoRepositoryError>;

    async fn soft_delete(&self, id: DemoId) -> Result<Option<Demo>, DemoRepositoryError>;
}
