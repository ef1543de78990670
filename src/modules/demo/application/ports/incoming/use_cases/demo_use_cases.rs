use async_trait::async_trait;

use crate::demo::application::domain::entities::{
    Demo, DemoId, DemoStatistics, DemoStatus, DEMO_NAME_MAX_LEN,
};
use crate::demo::application::ports::outgoing::DemoSearch;
use crate::shared::crud::{PageRequest, PageResult, PatchField};
use crate::user::application::domain::entities::UserId;

//
// ──────────────────────────────────────────────────────────
// Command validation
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DemoCommandError {
    #[error("Demo name cannot be empty")]
    EmptyName,

    #[error("Demo name must not exceed {DEMO_NAME_MAX_LEN} characters")]
    NameTooLong,
}

fn check_name(name: &str) -> Result<String, DemoCommandError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DemoCommandError::EmptyName);
    }
    if name.chars().count() > DEMO_NAME_MAX_LEN {
        return Err(DemoCommandError::NameTooLong);
    }
    Ok(name.to_string())
}

//
// ──────────────────────────────────────────────────────────
// Create Demo Command
// ──────────────────────────────────────────────────────────
//

/// The status stays textual here; the service validates it after the
/// ownership and uniqueness checks.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDemoCommand {
    name: String,
    description: Option<String>,
    status: String,
    priority: i32,
    is_featured: bool,
}

impl CreateDemoCommand {
    pub fn new(
        name: &str,
        description: Option<String>,
        status: Option<String>,
        priority: Option<i32>,
        is_featured: Option<bool>,
    ) -> Result<Self, DemoCommandError> {
        Ok(Self {
            name: check_name(name)?,
            description,
            status: status.unwrap_or_else(|| DemoStatus::default().as_str().to_string()),
            priority: priority.unwrap_or(0),
            is_featured: is_featured.unwrap_or(false),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn is_featured(&self) -> bool {
        self.is_featured
    }
}

//
// ──────────────────────────────────────────────────────────
// Update Demo Command
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateDemoCommand {
    pub(crate) name: Option<String>,
    pub(crate) description: PatchField<String>,
    pub(crate) status: Option<String>,
    pub(crate) priority: Option<i32>,
    pub(crate) is_featured: Option<bool>,
}

impl UpdateDemoCommand {
    pub fn new(
        name: Option<String>,
        description: PatchField<String>,
        status: Option<String>,
        priority: Option<i32>,
        is_featured: Option<bool>,
    ) -> Result<Self, DemoCommandError> {
        Ok(Self {
            name: name.as_deref().map(check_name).transpose()?,
            description,
            status,
            priority,
            is_featured,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

//
// ──────────────────────────────────────────────────────────
// Use Case Error
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DemoServiceError {
    #[error("Demo not found")]
    DemoNotFound,

    #[error("Owner not found")]
    OwnerNotFound,

    #[error("A demo named '{0}' already exists")]
    NameTaken(String),

    #[error("Status must be one of: active, inactive, pending")]
    InvalidStatus(String),

    #[error("Only the owner may modify this demo")]
    NotOwner,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

//
// ──────────────────────────────────────────────────────────
// Incoming Port
// ──────────────────────────────────────────────────────────
//

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DemoUseCases: Send + Sync {
    /// The caller always becomes the owner.
    async fn create_demo(
        &self,
        owner: UserId,
        command: CreateDemoCommand,
    ) -> Result<Demo, DemoServiceError>;

    /// Soft-deleted demos are reported as missing.
    async fn get_demo(&self, id: DemoId) -> Result<Demo, DemoServiceError>;

    async fn update_demo(
        &self,
        id: DemoId,
        caller: UserId,
        command: UpdateDemoCommand,
    ) -> Result<Demo, DemoServiceError>;

    async fn delete_demo(&self, id: DemoId, caller: UserId) -> Result<Demo, DemoServiceError>;

    async fn search_demos(
        &self,
        criteria: DemoSearch,
        page: PageRequest,
    ) -> Result<PageResult<Demo>, DemoServiceError>;

    async fn get_user_demos(
        &self,
        owner: UserId,
        page: PageRequest,
    ) -> Result<PageResult<Demo>, DemoServiceError>;

    async fn get_featured_demos(
        &self,
        page: PageRequest,
    ) -> Result<PageResult<Demo>, DemoServiceError>;

    async fn update_demo_status(
        &self,
        id: DemoId,
        caller: UserId,
        status: String,
    ) -> Result<Demo, DemoServiceError>;

    async fn set_demo_featured(
        &self,
        id: DemoId,
        caller: UserId,
        is_featured: bool,
    ) -> Result<Demo, DemoServiceError>;

    async fn update_demo_priority(
        &self,
        id: DemoId,
        caller: UserId,
        priority: i32,
    ) -> Result<Demo, DemoServiceError>;

    async fn get_statistics(&self) -> Result<DemoStatistics, DemoServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_command_applies_defaults() {
        let command = CreateDemoCommand::new(" D1 ", None, None, None, None).unwrap();

        assert_eq!(command.name(), "D1");
        assert_eq!(command.status(), "active");
        assert_eq!(command.priority(), 0);
        assert!(!command.is_featured());
    }

    #[test]
    fn create_command_keeps_raw_status() {
        let command =
            CreateDemoCommand::new("D1", None, Some("archived".to_string()), Some(3), None)
                .unwrap();

        assert_eq!(command.status(), "archived");
        assert_eq!(command.priority(), 3);
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(
            CreateDemoCommand::new("   ", None, None, None, None),
            Err(DemoCommandError::EmptyName)
        );
    }

    #[test]
    fn long_name_is_rejected() {
        let name = "n".repeat(DEMO_NAME_MAX_LEN + 1);

        assert_eq!(
            CreateDemoCommand::new(&name, None, None, None, None),
            Err(DemoCommandError::NameTooLong)
        );
        assert_eq!(
            UpdateDemoCommand::new(Some(name), PatchField::Unset, None, None, None),
            Err(DemoCommandError::NameTooLong)
        );
    }

    #[test]
    fn update_command_with_priority_only_touches_priority() {
        let command =
            UpdateDemoCommand::new(None, PatchField::Unset, None, Some(5), None).unwrap();

        assert_eq!(command.name(), None);
        assert_eq!(command.status(), None);
        assert!(command.description.is_unset());
        assert_eq!(command.priority, Some(5));
    }
}
