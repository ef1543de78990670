use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::shared::crud::{PageRequest, PageResult};
use crate::user::application::domain::entities::{User, UserId};
use crate::user::application::ports::incoming::use_cases::{
    ChangePasswordCommand, CreateUserCommand, UpdateUserCommand, UserServiceError, UserUseCases,
};
use crate::user::application::ports::outgoing::{
    HashError, NewUser, PasswordHasher, UniqueField, UserChanges, UserRepository,
    UserRepositoryError,
};

#[derive(Clone)]
pub struct UserService<R>
where
    R: UserRepository + Send + Sync,
{
    repository: R,
    hasher: Arc<dyn PasswordHasher + Send + Sync>,
}

impl<R> UserService<R>
where
    R: UserRepository + Send + Sync,
{
    pub fn new(repository: R, hasher: Arc<dyn PasswordHasher + Send + Sync>) -> Self {
        Self { repository, hasher }
    }

    async fn require(&self, id: UserId) -> Result<User, UserServiceError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repo_err)?
            .ok_or(UserServiceError::UserNotFound)
    }

    /// Conflict if `email` belongs to anyone other than `owner`.
    async fn ensure_email_free(
        &self,
        email: &str,
        owner: Option<UserId>,
    ) -> Result<(), UserServiceError> {
        match self
            .repository
            .find_by_email(email)
            .await
            .map_err(map_repo_err)?
        {
            Some(found) if Some(found.id) != owner => Err(UserServiceError::EmailTaken),
            _ => Ok(()),
        }
    }

    async fn ensure_username_free(
        &self,
        username: &str,
        owner: Option<UserId>,
    ) -> Result<(), UserServiceError> {
        match self
            .repository
            .find_by_username(username)
            .await
            .map_err(map_repo_err)?
        {
            Some(found) if Some(found.id) != owner => Err(UserServiceError::UsernameTaken),
            _ => Ok(()),
        }
    }

    async fn set_active(&self, id: UserId, is_active: bool) -> Result<User, UserServiceError> {
        let changes = UserChanges {
            is_active: Some(is_active),
            ..Default::default()
        };

        let user = self
            .repository
            .update(id, changes)
            .await
            .map_err(map_repo_err)?
            .ok_or(UserServiceError::UserNotFound)?;

        info!(user_id = %id, is_active, "User active flag changed");
        Ok(user)
    }
}

#[async_trait]
impl<R> UserUseCases for UserService<R>
where
    R: UserRepository + Send + Sync,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserServiceError> {
        self.ensure_email_free(command.email(), None).await?;
        if let Some(username) = command.username() {
            self.ensure_username_free(username, None).await?;
        }

        let hashed_password = self
            .hasher
            .hash_password(command.password())
            .await
            .map_err(map_hash_err)?;

        let (is_active, is_superuser, is_verified) = command.flags();
        let new_user = NewUser {
            email: command.email().to_string(),
            username: command.username().map(str::to_string),
            hashed_password,
            full_name: command.full_name().map(str::to_string),
            phone: command.phone().map(str::to_string),
            is_active,
            is_superuser,
            is_verified,
        };

        // a storage duplicate means a concurrent registration won the race
        let user = self
            .repository
            .create(new_user)
            .await
            .map_err(map_repo_err)?;

        info!(user_id = %user.id, email = %user.email, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserServiceError> {
        self.require(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, UserServiceError> {
        self.repository
            .find_by_email(email)
            .await
            .map_err(map_repo_err)
    }

    async fn update_user(
        &self,
        id: UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserServiceError> {
        let current = self.require(id).await?;

        if let Some(email) = command.email() {
            if email != current.email {
                self.ensure_email_free(email, Some(id)).await?;
            }
        }
        if let Some(username) = command.username() {
            if current.username.as_deref() != Some(username) {
                self.ensure_username_free(username, Some(id)).await?;
            }
        }

        let changes = UserChanges {
            email: command.email,
            username: command.username,
            full_name: command.full_name,
            phone: command.phone,
            avatar: command.avatar,
            bio: command.bio,
            is_active: command.is_active,
            is_superuser: command.is_superuser,
            is_verified: command.is_verified,
        };

        let user = self
            .repository
            .update(id, changes)
            .await
            .map_err(map_repo_err)?
            .ok_or(UserServiceError::UserNotFound)?;

        info!(user_id = %id, "User updated");
        Ok(user)
    }

    async fn change_password(
        &self,
        id: UserId,
        command: ChangePasswordCommand,
    ) -> Result<(), UserServiceError> {
        let user = self.require(id).await?;

        let current_ok = self
            .hasher
            .verify_password(command.current_password(), &user.hashed_password)
            .await
            .map_err(map_hash_err)?;
        if !current_ok {
            warn!(user_id = %id, "Password change rejected: wrong current password");
            return Err(UserServiceError::IncorrectPassword);
        }

        if command.new_password() != command.confirm_password() {
            return Err(UserServiceError::PasswordMismatch);
        }
        if command.new_password() == command.current_password() {
            return Err(UserServiceError::PasswordUnchanged);
        }

        let hashed = self
            .hasher
            .hash_password(command.new_password())
            .await
            .map_err(map_hash_err)?;

        self.repository
            .update_password(id, hashed)
            .await
            .map_err(map_repo_err)?
            .ok_or(UserServiceError::UserNotFound)?;

        info!(user_id = %id, "Password changed");
        Ok(())
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, UserServiceError> {
        let Some(user) = self
            .repository
            .find_by_email(email)
            .await
            .map_err(map_repo_err)?
        else {
            return Ok(None);
        };

        // An unusable stored hash counts as a mismatch.
        let matches = self
            .hasher
            .verify_password(password, &user.hashed_password)
            .await
            .unwrap_or(false);

        if !matches || !user.can_sign_in() {
            warn!(user_id = %user.id, "Authentication failed");
            return Ok(None);
        }

        let stamped = self
            .repository
            .record_login(user.id)
            .await
            .map_err(map_repo_err)?
            .unwrap_or(user);

        info!(user_id = %stamped.id, login_count = stamped.login_count, "User authenticated");
        Ok(Some(stamped))
    }

    async fn activate(&self, id: UserId) -> Result<User, UserServiceError> {
        self.set_active(id, true).await
    }

    async fn deactivate(&self, id: UserId) -> Result<User, UserServiceError> {
        self.set_active(id, false).await
    }

    async fn list_users(&self, page: PageRequest) -> Result<PageResult<User>, UserServiceError> {
        let items = self
            .repository
            .list(page.skip, page.limit)
            .await
            .map_err(map_repo_err)?;
        let total = self.repository.count().await.map_err(map_repo_err)?;

        Ok(PageResult::new(items, total, page))
    }

    async fn count_users(&self) -> Result<u64, UserServiceError> {
        self.repository.count().await.map_err(map_repo_err)
    }
}

fn map_repo_err(err: UserRepositoryError) -> UserServiceError {
    match err {
        UserRepositoryError::Duplicate(UniqueField::Email) => UserServiceError::EmailTaken,
        UserRepositoryError::Duplicate(UniqueField::Username) => UserServiceError::UsernameTaken,
        other => UserServiceError::RepositoryError(other.to_string()),
    }
}

fn map_hash_err(err: HashError) -> UserServiceError {
    UserServiceError::HashError(err.to_string())
}
