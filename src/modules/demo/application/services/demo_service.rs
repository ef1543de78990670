use async_trait::async_trait;
use tracing::{info, warn};

use crate::demo::application::domain::entities::{Demo, DemoId, DemoStatistics, DemoStatus};
use crate::demo::application::ports::incoming::use_cases::{
    CreateDemoCommand, DemoServiceError, DemoUseCases, UpdateDemoCommand,
};
use crate::demo::application::ports::outgoing::{
    DemoChanges, DemoRepository, DemoRepositoryError, DemoSearch, NewDemo,
};
use crate::shared::crud::{PageRequest, PageResult};
use crate::user::application::domain::entities::UserId;
use crate::user::application::ports::outgoing::UserRepository;

#[derive(Clone)]
pub struct DemoService<D, U>
where
    D: DemoRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    demos: D,
    users: U,
}

impl<D, U> DemoService<D, U>
where
    D: DemoRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn new(demos: D, users: U) -> Self {
        Self { demos, users }
    }

    async fn require(&self, id: DemoId) -> Result<Demo, DemoServiceError> {
        match self.demos.find_by_id(id).await.map_err(map_repo_err)? {
            Some(demo) if !demo.is_deleted => Ok(demo),
            _ => Err(DemoServiceError::DemoNotFound),
        }
    }

    async fn require_owned(&self, id: DemoId, caller: UserId) -> Result<Demo, DemoServiceError> {
        let demo = self.require(id).await?;
        if !demo.is_owned_by(caller) {
            warn!(demo_id = %id, caller_id = %caller, owner_id = %demo.owner_id, "Demo change rejected: not owner");
            return Err(DemoServiceError::NotOwner);
        }
        Ok(demo)
    }

    /// Conflict if a live demo other than `current` already uses `name`.
    async fn ensure_name_free(
        &self,
        name: &str,
        current: Option<DemoId>,
    ) -> Result<(), DemoServiceError> {
        match self.demos.find_by_name(name).await.map_err(map_repo_err)? {
            Some(found) if Some(found.id) != current => {
                Err(DemoServiceError::NameTaken(name.to_string()))
            }
            _ => Ok(()),
        }
    }

    async fn apply(&self, current: &Demo, changes: DemoChanges) -> Result<Demo, DemoServiceError> {
        let name = changes.name.clone().unwrap_or_else(|| current.name.clone());

        self.demos
            .update(current.id, changes)
            .await
            .map_err(|e| match e {
                // lost a rename race against another demo
                DemoRepositoryError::Duplicate => DemoServiceError::NameTaken(name),
                other => map_repo_err(other),
            })?
            .ok_or(DemoServiceError::DemoNotFound)
    }

    async fn count(&self, criteria: &DemoSearch) -> Result<u64, DemoServiceError> {
        self.demos.count(criteria).await.map_err(map_repo_err)
    }

    async fn count_status(&self, status: DemoStatus) -> Result<u64, DemoServiceError> {
        self.demos.count_by_status(status).await.map_err(map_repo_err)
    }

    async fn page(
        &self,
        items: Vec<Demo>,
        criteria: &DemoSearch,
        page: PageRequest,
    ) -> Result<PageResult<Demo>, DemoServiceError> {
        let total = self.count(criteria).await?;
        Ok(PageResult::new(items, total, page))
    }
}

fn parse_status(status: &str) -> Result<DemoStatus, DemoServiceError> {
    status
        .parse()
        .map_err(|_| DemoServiceError::InvalidStatus(status.to_string()))
}

#[async_trait]
impl<D, U> DemoUseCases for DemoService<D, U>
where
    D: DemoRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    async fn create_demo(
        &self,
        owner: UserId,
        command: CreateDemoCommand,
    ) -> Result<Demo, DemoServiceError> {
        self.users
            .find_by_id(owner)
            .await
            .map_err(|e| DemoServiceError::RepositoryError(e.to_string()))?
            .filter(|user| !user.is_deleted)
            .ok_or(DemoServiceError::OwnerNotFound)?;

        self.ensure_name_free(command.name(), None).await?;
        let status = parse_status(command.status())?;

        let new_demo = NewDemo {
            name: command.name().to_string(),
            description: command.description().map(str::to_string),
            status,
            priority: command.priority(),
            is_featured: command.is_featured(),
            owner_id: owner,
        };

        let demo = self.demos.create(new_demo).await.map_err(|e| match e {
            DemoRepositoryError::Duplicate => DemoServiceError::NameTaken(command.name().to_string()),
            other => map_repo_err(other),
        })?;

        info!(demo_id = %demo.id, owner_id = %owner, name = %demo.name, "Demo created");
        Ok(demo)
    }

    async fn get_demo(&self, id: DemoId) -> Result<Demo, DemoServiceError> {
        self.require(id).await
    }

    async fn update_demo(
        &self,
        id: DemoId,
        caller: UserId,
        command: UpdateDemoCommand,
    ) -> Result<Demo, DemoServiceError> {
        let current = self.require_owned(id, caller).await?;

        if let Some(name) = command.name() {
            if name != current.name {
                self.ensure_name_free(name, Some(id)).await?;
            }
        }
        let status = command.status().map(parse_status).transpose()?;

        let changes = DemoChanges {
            name: command.name,
            description: command.description,
            status,
            priority: command.priority,
            is_featured: command.is_featured,
        };

        let demo = self.apply(&current, changes).await?;

        info!(demo_id = %id, "Demo updated");
        Ok(demo)
    }

    async fn delete_demo(&self, id: DemoId, caller: UserId) -> Result<Demo, DemoServiceError> {
        self.require_owned(id, caller).await?;

        let demo = self
            .demos
            .soft_delete(id)
            .await
            .map_err(map_repo_err)?
            .ok_or(DemoServiceError::DemoNotFound)?;

        info!(demo_id = %id, "Demo soft-deleted");
        Ok(demo)
    }

    async fn search_demos(
        &self,
        criteria: DemoSearch,
        page: PageRequest,
    ) -> Result<PageResult<Demo>, DemoServiceError> {
        let items = self
            .demos
            .search(&criteria, page.skip, page.limit)
            .await
            .map_err(map_repo_err)?;

        self.page(items, &criteria, page).await
    }

    async fn get_user_demos(
        &self,
        owner: UserId,
        page: PageRequest,
    ) -> Result<PageResult<Demo>, DemoServiceError> {
        let items = self
            .demos
            .list_by_owner(owner, page.skip, page.limit)
            .await
            .map_err(map_repo_err)?;

        self.page(items, &DemoSearch::owned_by(owner), page).await
    }

    async fn get_featured_demos(
        &self,
        page: PageRequest,
    ) -> Result<PageResult<Demo>, DemoServiceError> {
        let items = self
            .demos
            .list_featured(page.skip, page.limit)
            .await
            .map_err(map_repo_err)?;

        self.page(items, &DemoSearch::featured(), page).await
    }

    async fn update_demo_status(
        &self,
        id: DemoId,
        caller: UserId,
        status: String,
    ) -> Result<Demo, DemoServiceError> {
        let current = self.require_owned(id, caller).await?;
        let status = parse_status(&status)?;

        let demo = self
            .apply(
                &current,
                DemoChanges {
                    status: Some(status),
                    ..Default::default()
                },
            )
            .await?;

        info!(demo_id = %id, status = %status, "Demo status changed");
        Ok(demo)
    }

    async fn set_demo_featured(
        &self,
        id: DemoId,
        caller: UserId,
        is_featured: bool,
    ) -> Result<Demo, DemoServiceError> {
        let current = self.require_owned(id, caller).await?;

        let demo = self
            .apply(
                &current,
                DemoChanges {
                    is_featured: Some(is_featured),
                    ..Default::default()
                },
            )
            .await?;

        info!(demo_id = %id, is_featured, "Demo featured flag changed");
        Ok(demo)
    }

    async fn update_demo_priority(
        &self,
        id: DemoId,
        caller: UserId,
        priority: i32,
    ) -> Result<Demo, DemoServiceError> {
        let current = self.require_owned(id, caller).await?;

        let demo = self
            .apply(
                &current,
                DemoChanges {
                    priority: Some(priority),
                    ..Default::default()
                },
            )
            .await?;

        info!(demo_id = %id, priority, "Demo priority changed");
        Ok(demo)
    }

    async fn get_statistics(&self) -> Result<DemoStatistics, DemoServiceError> {
        Ok(DemoStatistics {
            total: self.count(&DemoSearch::default()).await?,
            active: self.count_status(DemoStatus::Active).await?,
            inactive: self.count_status(DemoStatus::Inactive).await?,
            pending: self.count_status(DemoStatus::Pending).await?,
            featured: self.count(&DemoSearch::featured()).await?,
        })
    }
}

fn map_repo_err(err: DemoRepositoryError) -> DemoServiceError {
    DemoServiceError::RepositoryError(err.to_string())
}
