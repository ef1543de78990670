use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, DatabaseConnection, IntoActiveModel};
use std::sync::Arc;
use tracing::error;

use crate::demo::application::domain::entities::{Demo, DemoId, DemoStatus};
use crate::demo::application::ports::outgoing::{
    DemoChanges, DemoRepository, DemoRepositoryError, DemoSearch, NewDemo,
};
use crate::shared::crud::{Filters, OrderBy, RepositoryError, SoftDeleteRepository, UpdatePayload};
use crate::user::application::domain::entities::UserId;

use super::sea_orm_entity::demos::{self, ActiveModel as DemoActiveModel};

//
// ──────────────────────────────────────────────────────────
// Payload mapping
// ──────────────────────────────────────────────────────────
//

impl IntoActiveModel<DemoActiveModel> for NewDemo {
    fn into_active_model(self) -> DemoActiveModel {
        DemoActiveModel {
            name: Set(self.name),
            description: Set(self.description),
            status: Set(self.status.as_str().to_string()),
            priority: Set(self.priority),
            is_featured: Set(self.is_featured),
            owner_id: Set(self.owner_id.value()),
            is_deleted: Set(false),
            deleted_at: Set(None),
            ..Default::default()
        }
    }
}

impl UpdatePayload<DemoActiveModel> for DemoChanges {
    fn apply(self, active: &mut DemoActiveModel) {
        if let Some(name) = self.name {
            active.name = Set(name);
        }
        if let Some(description) = self.description.into_change() {
            active.description = Set(description);
        }
        if let Some(status) = self.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(priority) = self.priority {
            active.priority = Set(priority);
        }
        if let Some(is_featured) = self.is_featured {
            active.is_featured = Set(is_featured);
        }
    }
}

fn search_filters(criteria: &DemoSearch) -> Filters {
    let mut filters = Filters::new();

    if let Some(name) = &criteria.name {
        filters = filters.contains("name", name.as_str());
    }
    if let Some(status) = criteria.status {
        filters = filters.equals("status", status.as_str());
    }
    if let Some(is_featured) = criteria.is_featured {
        filters = filters.equals("is_featured", is_featured);
    }
    if let Some(owner_id) = criteria.owner_id {
        filters = filters.equals("owner_id", owner_id.value());
    }

    filters
}

fn to_domain(model: &demos::Model) -> Result<Demo, DemoRepositoryError> {
    model.to_domain().map_err(|e| {
        error!(demo_id = model.id, error = %e, "Demo row has an unknown status");
        DemoRepositoryError::CorruptRow {
            id: model.id,
            reason: e.to_string(),
        }
    })
}

fn to_domain_all(models: &[demos::Model]) -> Result<Vec<Demo>, DemoRepositoryError> {
    models.iter().map(to_domain).collect()
}

//
// ──────────────────────────────────────────────────────────
// Repository
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct DemoRepositoryPostgres {
    demos: SoftDeleteRepository<demos::Entity>,
}

impl DemoRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            demos: SoftDeleteRepository::new(db),
        }
    }

    async fn page(
        &self,
        criteria: &DemoSearch,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Demo>, DemoRepositoryError> {
        let models = self
            .demos
            .list(
                skip,
                limit,
                &search_filters(criteria),
                Some(&OrderBy::desc("priority")),
                false,
            )
            .await
            .map_err(map_repo_err)?;

        to_domain_all(&models)
    }
}

#[async_trait]
impl DemoRepository for DemoRepositoryPostgres {
    async fn find_by_id(&self, id: DemoId) -> Result<Option<Demo>, DemoRepositoryError> {
        let model = self.demos.get(id.value()).await.map_err(map_repo_err)?;
        model.as_ref().map(to_domain).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Demo>, DemoRepositoryError> {
        let model = self
            .demos
            .find_one(&Filters::new().equals("name", name), false)
            .await
            .map_err(map_repo_err)?;

        model.as_ref().map(to_domain).transpose()
    }

    async fn search(
        &self,
        criteria: &DemoSearch,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Demo>, DemoRepositoryError> {
        self.page(criteria, skip, limit).await
    }

    async fn count(&self, criteria: &DemoSearch) -> Result<u64, DemoRepositoryError> {
        self.demos
            .count(&search_filters(criteria), false)
            .await
            .map_err(map_repo_err)
    }

    async fn list_by_owner(
        &self,
        owner_id: UserId,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Demo>, DemoRepositoryError> {
        self.page(&DemoSearch::owned_by(owner_id), skip, limit).await
    }

    async fn list_featured(&self, skip: u64, limit: u64) -> Result<Vec<Demo>, DemoRepositoryError> {
        self.page(&DemoSearch::featured(), skip, limit).await
    }

    async fn count_by_status(&self, status: DemoStatus) -> Result<u64, DemoRepositoryError> {
        self.count(&DemoSearch::with_status(status)).await
    }

    async fn create(&self, demo: NewDemo) -> Result<Demo, DemoRepositoryError> {
        let inserted = self.demos.create(demo).await.map_err(map_repo_err)?;
        to_domain(&inserted)
    }

    async fn update(
        &self,
        id: DemoId,
        changes: DemoChanges,
    ) -> Result<Option<Demo>, DemoRepositoryError> {
        let Some(existing) = self.demos.get(id.value()).await.map_err(map_repo_err)? else {
            return Ok(None);
        };

        let updated = self
            .demos
            .update(existing, changes)
            .await
            .map_err(map_repo_err)?;

        to_domain(&updated).map(Some)
    }

    async fn soft_delete(&self, id: DemoId) -> Result<Option<Demo>, DemoRepositoryError> {
        let model = self
            .demos
            .soft_delete(id.value())
            .await
            .map_err(map_repo_err)?;

        model.as_ref().map(to_domain).transpose()
    }
}

fn map_repo_err(err: RepositoryError) -> DemoRepositoryError {
    match err {
        RepositoryError::UniqueViolation(_) => DemoRepositoryError::Duplicate,
        other => DemoRepositoryError::DatabaseError(other.to_string()),
    }
}
