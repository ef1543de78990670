use actix_web::HttpResponse;
use tracing::error;

use crate::demo::application::ports::incoming::use_cases::{DemoCommandError, DemoServiceError};
use crate::shared::api::ApiResponse;

pub fn map_demo_error(err: DemoServiceError) -> HttpResponse {
    match err {
        DemoServiceError::DemoNotFound => ApiResponse::not_found("DEMO_NOT_FOUND", "Demo not found"),
        DemoServiceError::OwnerNotFound => ApiResponse::not_found("USER_NOT_FOUND", "User not found"),
        DemoServiceError::NameTaken(name) => ApiResponse::conflict(
            "DEMO_NAME_TAKEN",
            &format!("A demo named '{name}' already exists"),
        ),
        DemoServiceError::InvalidStatus(status) => ApiResponse::unprocessable(
            "INVALID_STATUS",
            &format!("Invalid status '{status}', expected one of: active, inactive, pending"),
        ),
        DemoServiceError::NotOwner => {
            ApiResponse::forbidden("NOT_DEMO_OWNER", "Only the owner may modify this demo")
        }
        DemoServiceError::RepositoryError(msg) => {
            error!(error = %msg, "Demo operation failed");
            ApiResponse::internal_error()
        }
    }
}

pub fn map_command_error(err: DemoCommandError) -> HttpResponse {
    ApiResponse::unprocessable("VALIDATION_ERROR", &err.to_string())
}
