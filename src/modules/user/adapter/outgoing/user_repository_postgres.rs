use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter,
};
use std::sync::Arc;

use crate::shared::crud::{CrudRepository, Filters, OrderBy, RepositoryError, UpdatePayload};
use crate::user::application::domain::entities::{User, UserId};
use crate::user::application::ports::outgoing::{
    NewUser, UniqueField, UserChanges, UserRepository, UserRepositoryError,
};

use super::sea_orm_entity::users::{self, ActiveModel as UserActiveModel};

//
// ──────────────────────────────────────────────────────────
// Payload mapping
// ──────────────────────────────────────────────────────────
//

impl IntoActiveModel<UserActiveModel> for NewUser {
    fn into_active_model(self) -> UserActiveModel {
        UserActiveModel {
            email: Set(self.email),
            username: Set(self.username),
            hashed_password: Set(self.hashed_password),
            full_name: Set(self.full_name),
            phone: Set(self.phone),
            is_active: Set(self.is_active),
            is_superuser: Set(self.is_superuser),
            is_verified: Set(self.is_verified),
            is_deleted: Set(false),
            login_count: Set(0),
            ..Default::default()
        }
    }
}

impl UpdatePayload<UserActiveModel> for UserChanges {
    fn apply(self, active: &mut UserActiveModel) {
        if let Some(email) = self.email {
            active.email = Set(email);
        }
        if let Some(username) = self.username.into_change() {
            active.username = Set(username);
        }
        if let Some(full_name) = self.full_name.into_change() {
            active.full_name = Set(full_name);
        }
        if let Some(phone) = self.phone.into_change() {
            active.phone = Set(phone);
        }
        if let Some(avatar) = self.avatar.into_change() {
            active.avatar = Set(avatar);
        }
        if let Some(bio) = self.bio.into_change() {
            active.bio = Set(bio);
        }
        if let Some(is_active) = self.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(is_superuser) = self.is_superuser {
            active.is_superuser = Set(is_superuser);
        }
        if let Some(is_verified) = self.is_verified {
            active.is_verified = Set(is_verified);
        }
    }
}

struct PasswordChange(String);

impl UpdatePayload<UserActiveModel> for PasswordChange {
    fn apply(self, active: &mut UserActiveModel) {
        active.hashed_password = Set(self.0);
    }
}

//
// ──────────────────────────────────────────────────────────
// Repository
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct UserRepositoryPostgres {
    users: CrudRepository<users::Entity>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            users: CrudRepository::new(db),
        }
    }

    async fn find_one(&self, filters: Filters) -> Result<Option<User>, UserRepositoryError> {
        let found = self
            .users
            .list(0, 1, &filters, None)
            .await
            .map_err(map_repo_err)?;

        Ok(found.first().map(users::Model::to_domain))
    }

    async fn apply<P>(&self, id: UserId, payload: P) -> Result<Option<User>, UserRepositoryError>
    where
        P: UpdatePayload<UserActiveModel>,
    {
        let Some(existing) = self.users.get(id.value()).await.map_err(map_repo_err)? else {
            return Ok(None);
        };

        let updated = self
            .users
            .update(existing, payload)
            .await
            .map_err(map_repo_err)?;

        Ok(Some(updated.to_domain()))
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let model = self.users.get(id.value()).await.map_err(map_repo_err)?;
        Ok(model.as_ref().map(users::Model::to_domain))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        self.find_one(Filters::new().equals("email", email)).await
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        self.find_one(Filters::new().equals("username", username))
            .await
    }

    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<User>, UserRepositoryError> {
        let models = self
            .users
            .list(skip, limit, &Filters::new(), Some(&OrderBy::asc("id")))
            .await
            .map_err(map_repo_err)?;

        Ok(models.iter().map(users::Model::to_domain).collect())
    }

    async fn count(&self) -> Result<u64, UserRepositoryError> {
        self.users
            .count(&Filters::new())
            .await
            .map_err(map_repo_err)
    }

    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let inserted = self.users.create(user).await.map_err(map_repo_err)?;
        Ok(inserted.to_domain())
    }

    async fn update(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<Option<User>, UserRepositoryError> {
        self.apply(id, changes).await
    }

    async fn update_password(
        &self,
        id: UserId,
        hashed_password: String,
    ) -> Result<Option<User>, UserRepositoryError> {
        self.apply(id, PasswordChange(hashed_password)).await
    }

    async fn record_login(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let now = Utc::now().fixed_offset();

        // counter is bumped in SQL so concurrent logins all count
        let stamp = users::Entity::update_many()
            .col_expr(
                users::Column::LoginCount,
                Expr::col(users::Column::LoginCount).add(1),
            )
            .col_expr(users::Column::LastLoginAt, Expr::value(Some(now)));

        #[cfg(feature = "no_db_triggers")]
        let stamp = stamp.col_expr(users::Column::UpdatedAt, Expr::value(now));

        let result = stamp
            .filter(users::Column::Id.eq(id.value()))
            .exec(self.users.db())
            .await
            .map_err(|e| map_repo_err(e.into()))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }
}

fn map_repo_err(err: RepositoryError) -> UserRepositoryError {
    match err {
        RepositoryError::UniqueViolation(msg) => UserRepositoryError::Duplicate(violated_field(&msg)),
        other => UserRepositoryError::DatabaseError(other.to_string()),
    }
}

/// Postgres names the constraint after the column, e.g. `users_username_key`.
fn violated_field(message: &str) -> UniqueField {
    if message.contains("username") {
        UniqueField::Username
    } else {
        UniqueField::Email
    }
}
