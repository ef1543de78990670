use std::{marker::PhantomData, sync::Arc};

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, PrimaryKeyTrait, QueryFilter, QueryOrder, QuerySelect,
    Select, SqlErr,
};

use super::{Filters, OrderBy};

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<DbErr> for RepositoryError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => RepositoryError::UniqueViolation(msg),
            _ => RepositoryError::DatabaseError(err.to_string()),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Update payloads
// ──────────────────────────────────────────────────────────
//

/// Partial update applied onto an active model loaded from the row.
///
/// Implementations must only `Set` the columns they carry a value for, so
/// everything else keeps its stored value.
pub trait UpdatePayload<A> {
    fn apply(self, active: &mut A);
}

//
// ──────────────────────────────────────────────────────────
// Repository
// ──────────────────────────────────────────────────────────
//

pub type PrimaryKeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// Create / read / update / delete over any entity keyed by an `i64` id.
pub struct CrudRepository<E> {
    db: Arc<DatabaseConnection>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for CrudRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            _entity: PhantomData,
        }
    }
}

impl<E> std::fmt::Debug for CrudRepository<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrudRepository")
            .field("entity", &std::any::type_name::<E>())
            .finish()
    }
}

impl<E> CrudRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Clone + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    PrimaryKeyOf<E>: From<i64>,
{
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Filtered, optionally ordered select. No paging applied.
    pub fn select(
        &self,
        filters: &Filters,
        order_by: Option<&OrderBy>,
    ) -> Result<Select<E>, RepositoryError> {
        let mut query = E::find().filter(filters.to_condition::<E>()?);

        if let Some(order_by) = order_by {
            let (column, order) = order_by.resolve::<E>()?;
            query = query.order_by(column, order);
        }

        Ok(query)
    }

    pub async fn get(&self, id: i64) -> Result<Option<E::Model>, RepositoryError> {
        Ok(E::find_by_id(id).one(self.db()).await?)
    }

    pub async fn list(
        &self,
        skip: u64,
        limit: u64,
        filters: &Filters,
        order_by: Option<&OrderBy>,
    ) -> Result<Vec<E::Model>, RepositoryError> {
        self.fetch_page(self.select(filters, order_by)?, skip, limit)
            .await
    }

    pub async fn count(&self, filters: &Filters) -> Result<u64, RepositoryError> {
        Ok(self.select(filters, None)?.count(self.db()).await?)
    }

    pub async fn exists(&self, filters: &Filters) -> Result<bool, RepositoryError> {
        Ok(self.select(filters, None)?.one(self.db()).await?.is_some())
    }

    pub async fn create<P>(&self, payload: P) -> Result<E::Model, RepositoryError>
    where
        P: IntoActiveModel<E::ActiveModel>,
    {
        Ok(payload.into_active_model().insert(self.db()).await?)
    }

    /// Applies `payload` onto `existing`. When the payload carries no change the
    /// row is returned untouched without a round trip.
    pub async fn update<P>(&self, existing: E::Model, payload: P) -> Result<E::Model, RepositoryError>
    where
        P: UpdatePayload<E::ActiveModel>,
    {
        let mut active = existing.clone().into_active_model();
        payload.apply(&mut active);

        if !active.is_changed() {
            return Ok(existing);
        }

        Ok(active.update(self.db()).await?)
    }

    /// Hard delete. Returns the row as it was before removal.
    pub async fn remove(&self, id: i64) -> Result<Option<E::Model>, RepositoryError> {
        let Some(model) = self.get(id).await? else {
            return Ok(None);
        };

        E::delete_by_id(id).exec(self.db()).await?;

        Ok(Some(model))
    }

    pub(crate) async fn fetch_page(
        &self,
        query: Select<E>,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<E::Model>, RepositoryError> {
        Ok(query.offset(skip).limit(limit).all(self.db()).await?)
    }
}
