use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::crud::PatchField;
use crate::user::application::domain::entities::User;

/// Public view of a user. Never exposes the password hash.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "john@example.com")]
    pub email: String,
    #[schema(example = "johndoe")]
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_verified: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub login_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.value(),
            email: user.email,
            username: user.username,
            full_name: user.full_name,
            phone: user.phone,
            avatar: user.avatar,
            bio: user.bio,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            is_verified: user.is_verified,
            last_login_at: user.last_login_at,
            login_count: user.login_count,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Profile update body. Omitted fields are kept, `null` clears nullable ones.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequestDto {
    pub email: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub username: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub full_name: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub phone: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub avatar: PatchField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub bio: PatchField<String>,
    /// Administrative routes only
    pub is_active: Option<bool>,
    /// Administrative routes only
    pub is_superuser: Option<bool>,
    /// Administrative routes only
    pub is_verified: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangePasswordRequestDto {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}
