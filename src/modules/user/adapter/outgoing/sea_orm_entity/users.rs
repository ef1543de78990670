use sea_orm::entity::prelude::*;

use crate::user::application::domain::entities::{User, UserId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub username: Option<String>,
    pub hashed_password: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_verified: bool,
    pub is_deleted: bool,
    pub last_login_at: Option<DateTimeWithTimeZone>,
    pub login_count: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn to_domain(&self) -> User {
        User {
            id: UserId::from(self.id),
            email: self.email.clone(),
            username: self.username.clone(),
            hashed_password: self.hashed_password.clone(),
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            avatar: self.avatar.clone(),
            bio: self.bio.clone(),
            is_active: self.is_active,
            is_superuser: self.is_superuser,
            is_verified: self.is_verified,
            is_deleted: self.is_deleted,
            last_login_at: self.last_login_at.map(Into::into),
            login_count: self.login_count,
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::demo::adapter::outgoing::sea_orm_entity::demos::Entity")]
    Demos,
}

impl Related<crate::demo::adapter::outgoing::sea_orm_entity::demos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Demos.def()
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
