use sea_orm::entity::prelude::*;

use crate::demo::application::domain::entities::{Demo, DemoId, InvalidDemoStatus};
use crate::shared::crud::SoftDeletable;
use crate::user::application::domain::entities::UserId;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "demos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: String,
    pub priority: i32,
    pub is_featured: bool,
    pub owner_id: i64,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Fails only when the stored status is outside the known set.
    pub fn to_domain(&self) -> Result<Demo, InvalidDemoStatus> {
        Ok(Demo {
            id: DemoId::from(self.id),
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status.parse()?,
            priority: self.priority,
            is_featured: self.is_featured,
            owner_id: UserId::from(self.owner_id),
            is_deleted: self.is_deleted,
            deleted_at: self.deleted_at.map(Into::into),
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        })
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::user::adapter::outgoing::sea_orm_entity::users::Entity",
        from = "Column::OwnerId",
        to = "crate::user::adapter::outgoing::sea_orm_entity::users::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
}

impl Related<crate::user::adapter::outgoing::sea_orm_entity::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl SoftDeletable for Entity {
    fn deleted_flag_column() -> Self::Column {
        Column::IsDeleted
    }

    fn deleted_at_column() -> Self::Column {
        Column::DeletedAt
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        #[cfg(feature = "no_db_triggers")]
        {
            use chrono::Utc;
            use sea_orm::ActiveValue::Set;

            if !_insert {
                self.updated_at = Set(Utc::now().into());
            }
        }

        Ok(self)
    }
}
