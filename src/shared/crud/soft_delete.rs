use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, Select,
};

use super::{
    repository::PrimaryKeyOf, CrudRepository, Filters, OrderBy, RepositoryError, UpdatePayload,
};

/// Entities that carry an `is_deleted` flag and a `deleted_at` timestamp.
pub trait SoftDeletable: EntityTrait {
    fn deleted_flag_column() -> Self::Column;
    fn deleted_at_column() -> Self::Column;
}

/// [`CrudRepository`] whose listings hide soft-deleted rows unless asked.
///
/// `get` is a direct primary key lookup and still returns deleted rows, so
/// callers decide how to treat them.
pub struct SoftDeleteRepository<E> {
    inner: CrudRepository<E>,
}

impl<E> Clone for SoftDeleteRepository<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E> std::fmt::Debug for SoftDeleteRepository<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftDeleteRepository")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<E> SoftDeleteRepository<E>
where
    E: SoftDeletable,
    E::Model: IntoActiveModel<E::ActiveModel> + Clone + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    PrimaryKeyOf<E>: From<i64>,
{
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            inner: CrudRepository::new(db),
        }
    }

    pub fn select(
        &self,
        filters: &Filters,
        order_by: Option<&OrderBy>,
        include_deleted: bool,
    ) -> Result<Select<E>, RepositoryError> {
        let query = self.inner.select(filters, order_by)?;

        Ok(if include_deleted {
            query
        } else {
            query.filter(E::deleted_flag_column().eq(false))
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<E::Model>, RepositoryError> {
        self.inner.get(id).await
    }

    pub async fn list(
        &self,
        skip: u64,
        limit: u64,
        filters: &Filters,
        order_by: Option<&OrderBy>,
        include_deleted: bool,
    ) -> Result<Vec<E::Model>, RepositoryError> {
        let query = self.select(filters, order_by, include_deleted)?;
        self.inner.fetch_page(query, skip, limit).await
    }

    pub async fn count(
        &self,
        filters: &Filters,
        include_deleted: bool,
    ) -> Result<u64, RepositoryError> {
        Ok(self
            .select(filters, None, include_deleted)?
            .count(self.inner.db())
            .await?)
    }

    pub async fn find_one(
        &self,
        filters: &Filters,
        include_deleted: bool,
    ) -> Result<Option<E::Model>, RepositoryError> {
        Ok(self
            .select(filters, None, include_deleted)?
            .one(self.inner.db())
            .await?)
    }

    pub async fn exists(&self, filters: &Filters) -> Result<bool, RepositoryError> {
        self.inner.exists(filters).await
    }

    pub async fn create<P>(&self, payload: P) -> Result<E::Model, RepositoryError>
    where
        P: IntoActiveModel<E::ActiveModel>,
    {
        self.inner.create(payload).await
    }

    pub async fn update<P>(&self, existing: E::Model, payload: P) -> Result<E::Model, RepositoryError>
    where
        P: UpdatePayload<E::ActiveModel>,
    {
        self.inner.update(existing, payload).await
    }

    pub async fn remove(&self, id: i64) -> Result<Option<E::Model>, RepositoryError> {
        self.inner.remove(id).await
    }

    /// Flags the row as deleted and stamps `deleted_at`. `None` when the row
    /// does not exist.
    pub async fn soft_delete(&self, id: i64) -> Result<Option<E::Model>, RepositoryError> {
        let Some(model) = self.inner.get(id).await? else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.set(E::deleted_flag_column(), true.into());
        active.set(
            E::deleted_at_column(),
            Some(Utc::now().fixed_offset()).into(),
        );

        Ok(Some(active.update(self.inner.db()).await?))
    }
}
