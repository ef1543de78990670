use async_trait::async_trait;
use email_address::EmailAddress;

use crate::shared::crud::{PageRequest, PageResult, PatchField};
use crate::user::application::domain::entities::{User, UserId};

pub const USERNAME_MAX_LEN: usize = 50;
pub const FULL_NAME_MAX_LEN: usize = 100;
pub const PHONE_MAX_LEN: usize = 20;
pub const AVATAR_MAX_LEN: usize = 255;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 100;

//
// ──────────────────────────────────────────────────────────
// Command validation
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UserCommandError {
    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username must not exceed {USERNAME_MAX_LEN} characters")]
    UsernameTooLong,

    #[error("Full name must not exceed {FULL_NAME_MAX_LEN} characters")]
    FullNameTooLong,

    #[error("Phone must not exceed {PHONE_MAX_LEN} characters")]
    PhoneTooLong,

    #[error("Avatar URL must not exceed {AVATAR_MAX_LEN} characters")]
    AvatarTooLong,

    #[error("Password must be between {PASSWORD_MIN_LEN} and {PASSWORD_MAX_LEN} characters")]
    InvalidPasswordLength,
}

fn normalize_email(email: &str) -> Result<String, UserCommandError> {
    let email = email.trim();
    if !EmailAddress::is_valid(email) {
        return Err(UserCommandError::InvalidEmail);
    }
    Ok(email.to_string())
}

fn check_username(username: &str) -> Result<String, UserCommandError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(UserCommandError::EmptyUsername);
    }
    if username.chars().count() > USERNAME_MAX_LEN {
        return Err(UserCommandError::UsernameTooLong);
    }
    Ok(username.to_string())
}

fn check_len(
    value: &str,
    max: usize,
    err: UserCommandError,
) -> Result<(), UserCommandError> {
    if value.chars().count() > max {
        return Err(err);
    }
    Ok(())
}

pub(crate) fn check_password(password: &str) -> Result<(), UserCommandError> {
    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Err(UserCommandError::InvalidPasswordLength);
    }
    Ok(())
}

//
// ──────────────────────────────────────────────────────────
// Create User Command
// ──────────────────────────────────────────────────────────
//

/// Account flags default to active, regular, unverified.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateUserCommand {
    email: String,
    username: Option<String>,
    password: String,
    full_name: Option<String>,
    phone: Option<String>,
    is_active: bool,
    is_superuser: bool,
    is_verified: bool,
}

impl CreateUserCommand {
    pub fn new(
        email: &str,
        username: Option<String>,
        password: String,
        full_name: Option<String>,
        phone: Option<String>,
    ) -> Result<Self, UserCommandError> {
        let email = normalize_email(email)?;
        let username = username.as_deref().map(check_username).transpose()?;
        check_password(&password)?;
        if let Some(full_name) = &full_name {
            check_len(full_name, FULL_NAME_MAX_LEN, UserCommandError::FullNameTooLong)?;
        }
        if let Some(phone) = &phone {
            check_len(phone, PHONE_MAX_LEN, UserCommandError::PhoneTooLong)?;
        }

        Ok(Self {
            email,
            username,
            password,
            full_name,
            phone,
            is_active: true,
            is_superuser: false,
            is_verified: false,
        })
    }

    /// Administrative creation may preset the account flags.
    pub fn with_flags(mut self, is_active: bool, is_superuser: bool, is_verified: bool) -> Self {
        self.is_active = is_active;
        self.is_superuser = is_superuser;
        self.is_verified = is_verified;
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn flags(&self) -> (bool, bool, bool) {
        (self.is_active, self.is_superuser, self.is_verified)
    }
}

//
// ──────────────────────────────────────────────────────────
// Update User Command
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateUserCommand {
    pub(crate) email: Option<String>,
    pub(crate) username: PatchField<String>,
    pub(crate) full_name: PatchField<String>,
    pub(crate) phone: PatchField<String>,
    pub(crate) avatar: PatchField<String>,
    pub(crate) bio: PatchField<String>,
    pub(crate) is_active: Option<bool>,
    pub(crate) is_superuser: Option<bool>,
    pub(crate) is_verified: Option<bool>,
}

/// Account flags a caller may only change through an administrative route.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AccountFlags {
    pub is_active: Option<bool>,
    pub is_superuser: Option<bool>,
    pub is_verified: Option<bool>,
}

impl UpdateUserCommand {
    pub fn new(
        email: Option<String>,
        username: PatchField<String>,
        full_name: PatchField<String>,
        phone: PatchField<String>,
        avatar: PatchField<String>,
        bio: PatchField<String>,
    ) -> Result<Self, UserCommandError> {
        let email = email.as_deref().map(normalize_email).transpose()?;
        let username = match username {
            PatchField::Value(v) => PatchField::Value(check_username(&v)?),
            other => other,
        };
        if let Some(v) = full_name.as_value() {
            check_len(v, FULL_NAME_MAX_LEN, UserCommandError::FullNameTooLong)?;
        }
        if let Some(v) = phone.as_value() {
            check_len(v, PHONE_MAX_LEN, UserCommandError::PhoneTooLong)?;
        }
        if let Some(v) = avatar.as_value() {
            check_len(v, AVATAR_MAX_LEN, UserCommandError::AvatarTooLong)?;
        }

        Ok(Self {
            email,
            username,
            full_name,
            phone,
            avatar,
            bio,
            ..Default::default()
        })
    }

    pub fn with_account_flags(mut self, flags: AccountFlags) -> Self {
        self.is_active = flags.is_active;
        self.is_superuser = flags.is_superuser;
        self.is_verified = flags.is_verified;
        self
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_value().map(String::as_str)
    }
}

//
// ──────────────────────────────────────────────────────────
// Change Password Command
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub struct ChangePasswordCommand {
    current_password: String,
    new_password: String,
    confirm_password: String,
}

impl ChangePasswordCommand {
    pub fn new(
        current_password: String,
        new_password: String,
        confirm_password: String,
    ) -> Result<Self, UserCommandError> {
        check_password(&new_password)?;

        Ok(Self {
            current_password,
            new_password,
            confirm_password,
        })
    }

    pub fn current_password(&self) -> &str {
        &self.current_password
    }

    pub fn new_password(&self) -> &str {
        &self.new_password
    }

    pub fn confirm_password(&self) -> &str {
        &self.confirm_password
    }
}

//
// ──────────────────────────────────────────────────────────
// Use Case Error
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UserServiceError {
    #[error("User not found")]
    UserNotFound,

    #[error("Email is already registered")]
    EmailTaken,

    #[error("Username is already taken")]
    UsernameTaken,

    #[error("Current password is incorrect")]
    IncorrectPassword,

    #[error("Password confirmation does not match")]
    PasswordMismatch,

    #[error("New password must differ from the current password")]
    PasswordUnchanged,

    #[error("Password hashing error: {0}")]
    HashError(String),

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
pub trait UserUseCases: Send + Sync {
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserServiceError>;

    async fn get_user(&self, id: UserId) -> Result<User, UserServiceError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, UserServiceError>;

    async fn update_user(
        &self,
        id: UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserServiceError>;

    async fn change_password(
        &self,
        id: UserId,
        command: ChangePasswordCommand,
    ) -> Result<(), UserServiceError>;

    /// `Ok(None)` for any credential or account-state mismatch.
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, UserServiceError>;

    async fn activate(&self, id: UserId) -> Result<User, UserServiceError>;

    async fn deactivate(&self, id: UserId) -> Result<User, UserServiceError>;

    async fn list_users(&self, page: PageRequest) -> Result<PageResult<User>, UserServiceError>;

    async fn count_users(&self) -> Result<u64, UserServiceError>;
}
