// src/api/schemas.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Standard success envelope
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    /// Always true for successful responses
    #[schema(example = true)]
    pub success: bool,
    /// Human-readable outcome
    #[schema(example = "Operation succeeded")]
    pub message: String,
    /// Response data
    pub data: T,
    pub timestamp: DateTime<Utc>,
}

/// Success envelope without data
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Logged out successfully")]
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Standard error envelope
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false for error responses
    #[schema(example = false)]
    pub success: bool,
    /// Human-readable error message
    #[schema(example = "Demo not found")]
    pub message: String,
    /// Error code for programmatic handling
    #[schema(example = "DEMO_NOT_FOUND")]
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

/// Paginated `data` member
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct PaginatedData<T> {
    pub items: Vec<T>,
    #[schema(example = 42)]
    pub total: u64,
    #[schema(example = 1)]
    pub page: u64,
    #[schema(example = 20)]
    pub page_size: u64,
    #[schema(example = 3)]
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}
