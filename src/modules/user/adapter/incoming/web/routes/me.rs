use actix_web::{get, put, web, Responder};
use tracing::info;

use crate::api::schemas::{ErrorResponse, MessageResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::CurrentUser;
use crate::shared::api::ApiResponse;
use crate::user::application::ports::incoming::use_cases::{
    ChangePasswordCommand, UpdateUserCommand,
};
use crate::AppState;

use super::dto::{ChangePasswordRequestDto, UpdateUserRequestDto, UserResponse};
use super::errors::{map_command_error, map_user_error};

/// Current user profile
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "users",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Profile of the caller", body = inline(SuccessResponse<UserResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[get("/api/v1/users/me")]
pub async fn get_me_handler(user: CurrentUser) -> impl Responder {
    ApiResponse::success("User profile retrieved", UserResponse::from(user.0))
}

/// Update own profile
///
/// Account flags in the body are ignored on this route.
#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    tag = "users",
    security(("BearerAuth" = [])),
    request_body = UpdateUserRequestDto,
    responses(
        (status = 200, description = "Profile updated", body = inline(SuccessResponse<UserResponse>)),
        (status = 409, description = "Email or username taken", body = ErrorResponse),
        (status = 422, description = "Invalid input", body = ErrorResponse),
    )
)]
#[put("/api/v1/users/me")]
pub async fn update_me_handler(
    user: CurrentUser,
    data: web::Data<AppState>,
    payload: web::Json<UpdateUserRequestDto>,
) -> impl Responder {
    let dto = payload.into_inner();

    let command = match UpdateUserCommand::new(
        dto.email,
        dto.username,
        dto.full_name,
        dto.phone,
        dto.avatar,
        dto.bio,
    ) {
        Ok(cmd) => cmd,
        Err(err) => return map_command_error(err),
    };

    match data.user_service.update_user(user.id(), command).await {
        Ok(updated) => ApiResponse::success("Profile updated", UserResponse::from(updated)),
        Err(err) => map_user_error(err),
    }
}

/// Change own password
#[utoipa::path(
    put,
    path = "/api/v1/users/me/password",
    tag = "users",
    security(("BearerAuth" = [])),
    request_body = ChangePasswordRequestDto,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Wrong current password, mismatch or unchanged", body = ErrorResponse),
    )
)]
#[put("/api/v1/users/me/password")]
pub async fn change_password_handler(
    user: CurrentUser,
    data: web::Data<AppState>,
    payload: web::Json<ChangePasswordRequestDto>,
) -> impl Responder {
    let dto = payload.into_inner();

    let command = match ChangePasswordCommand::new(
        dto.current_password,
        dto.new_password,
        dto.confirm_password,
    ) {
        Ok(cmd) => cmd,
        Err(err) => return map_command_error(err),
    };

    match data.user_service.change_password(user.id(), command).await {
        Ok(()) => {
            info!(user_id = %user.id(), "Password changed via API");
            ApiResponse::message("Password changed successfully")
        }
        Err(err) => map_user_error(err),
    }
}
