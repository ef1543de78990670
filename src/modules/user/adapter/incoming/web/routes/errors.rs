use actix_web::HttpResponse;
use tracing::error;

use crate::shared::api::ApiResponse;
use crate::user::application::ports::incoming::use_cases::{UserCommandError, UserServiceError};

pub fn map_user_error(err: UserServiceError) -> HttpResponse {
    match err {
        UserServiceError::UserNotFound => ApiResponse::not_found("USER_NOT_FOUND", "User not found"),
        UserServiceError::EmailTaken => {
            ApiResponse::conflict("EMAIL_TAKEN", "Email is already registered")
        }
        UserServiceError::UsernameTaken => {
            ApiResponse::conflict("USERNAME_TAKEN", "Username is already taken")
        }
        UserServiceError::IncorrectPassword => {
            ApiResponse::bad_request("INCORRECT_PASSWORD", "Current password is incorrect")
        }
        UserServiceError::PasswordMismatch => {
            ApiResponse::bad_request("PASSWORD_MISMATCH", "Password confirmation does not match")
        }
        UserServiceError::PasswordUnchanged => ApiResponse::bad_request(
            "PASSWORD_UNCHANGED",
            "New password must differ from the current password",
        ),
        UserServiceError::HashError(msg) | UserServiceError::RepositoryError(msg) => {
            error!(error = %msg, "User operation failed");
            ApiResponse::internal_error()
        }
    }
}

pub fn map_command_error(err: UserCommandError) -> HttpResponse {
    ApiResponse::unprocessable("VALIDATION_ERROR", &err.to_string())
}
