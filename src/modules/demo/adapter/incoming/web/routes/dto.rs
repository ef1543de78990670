use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::demo::application::domain::entities::{Demo, DemoStatus};
use crate::shared::api::PageQuery;
use crate::shared::crud::PatchField;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DemoResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Sample demo")]
    pub name: String,
    pub description: Option<String>,
    pub status: DemoStatus,
    #[schema(example = 1)]
    pub priority: i32,
    pub is_featured: bool,
    #[schema(example = 1)]
    pub owner_id: i64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Demo> for DemoResponse {
    fn from(demo: Demo) -> Self {
        Self {
            id: demo.id.value(),
            name: demo.name,
            description: demo.description,
            status: demo.status,
            priority: demo.priority,
            is_featured: demo.is_featured,
            owner_id: demo.owner_id.value(),
            is_deleted: demo.is_deleted,
            created_at: demo.created_at,
            updated_at: demo.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDemoRequestDto {
    #[schema(example = "Sample demo")]
    pub name: String,
    pub description: Option<String>,
    /// `active` when omitted
    #[schema(example = "active")]
    pub status: Option<String>,
    #[schema(example = 1)]
    pub priority: Option<i32>,
    pub is_featured: Option<bool>,
}

/// Partial update. Omitted fields are kept, `null` clears the description.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateDemoRequestDto {
    pub name: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub description: PatchField<String>,
    pub status: Option<String>,
    pub priority: Option<i32>,
    pub is_featured: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DemoStatusRequestDto {
    #[schema(example = "inactive")]
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DemoFeaturedRequestDto {
    pub is_featured: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DemoPriorityRequestDto {
    #[schema(example = 5)]
    pub priority: i32,
}

/// Query string of the public demo listing.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DemoListQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    /// Name substring
    pub name: Option<String>,
    /// active, inactive or pending
    pub status: Option<String>,
    pub is_featured: Option<bool>,
    pub owner_id: Option<i64>,
}

impl DemoListQuery {
    pub fn page(&self) -> PageQuery {
        PageQuery {
            skip: self.skip,
            limit: self.limit,
        }
    }
}
