use actix_web::{get, put, web, Responder};
use tracing::info;

use crate::api::schemas::{ErrorResponse, PaginatedData, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::Superuser;
use crate::shared::api::{ApiResponse, PageQuery};
use crate::user::application::domain::entities::UserId;
use crate::user::application::ports::incoming::use_cases::{AccountFlags, UpdateUserCommand};
use crate::AppState;

use super::dto::{UpdateUserRequestDto, UserResponse};
use super::errors::{map_command_error, map_user_error};

//
// ──────────────────────────────────────────────────────────
// Listing
// ──────────────────────────────────────────────────────────
//

/// List users (superuser)
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    security(("BearerAuth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Page of users", body = inline(SuccessResponse<PaginatedData<UserResponse>>)),
        (status = 403, description = "Caller is not a superuser", body = ErrorResponse),
    )
)]
#[get("/api/v1/users")]
pub async fn list_users_handler(
    _admin: Superuser,
    data: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    let page = query.into_inner().to_request(data.page_limits);

    match data.user_service.list_users(page).await {
        Ok(result) => ApiResponse::paginated("Users retrieved", result.map(UserResponse::from)),
        Err(err) => map_user_error(err),
    }
}

//
// ──────────────────────────────────────────────────────────
// Single user
// ──────────────────────────────────────────────────────────
//

/// Get a user by id (superuser)
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "users",
    security(("BearerAuth" = [])),
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = inline(SuccessResponse<UserResponse>)),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
#[get("/api/v1/users/{id:\\d+}")]
pub async fn get_user_handler(
    _admin: Superuser,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    match data.user_service.get_user(UserId::from(path.into_inner())).await {
        Ok(user) => ApiResponse::success("User retrieved", UserResponse::from(user)),
        Err(err) => map_user_error(err),
    }
}

/// Update any user, including account flags (superuser)
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "users",
    security(("BearerAuth" = [])),
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequestDto,
    responses(
        (status = 200, description = "User updated", body = inline(SuccessResponse<UserResponse>)),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email or username taken", body = ErrorResponse),
    )
)]
#[put("/api/v1/users/{id:\\d+}")]
pub async fn update_user_handler(
    admin: Superuser,
    data: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateUserRequestDto>,
) -> impl Responder {
    let id = UserId::from(path.into_inner());
    let dto = payload.into_inner();

    let flags = AccountFlags {
        is_active: dto.is_active,
        is_superuser: dto.is_superuser,
        is_verified: dto.is_verified,
    };

    let command = match UpdateUserCommand::new(
        dto.email,
        dto.username,
        dto.full_name,
        dto.phone,
        dto.avatar,
        dto.bio,
    ) {
        Ok(cmd) => cmd.with_account_flags(flags),
        Err(err) => return map_command_error(err),
    };

    match data.user_service.update_user(id, command).await {
        Ok(user) => {
            info!(admin_id = %admin.0.id, user_id = %id, "User updated by superuser");
            ApiResponse::success("User updated", UserResponse::from(user))
        }
        Err(err) => map_user_error(err),
    }
}

/// Deactivate a user (superuser)
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/deactivate",
    tag = "users",
    security(("BearerAuth" = [])),
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deactivated", body = inline(SuccessResponse<UserResponse>)),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
#[put("/api/v1/users/{id:\\d+}/deactivate")]
pub async fn deactivate_user_handler(
    _admin: Superuser,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    match data.user_service.deactivate(UserId::from(path.into_inner())).await {
        Ok(user) => ApiResponse::success("User deactivated", UserResponse::from(user)),
        Err(err) => map_user_error(err),
    }
}

/// Activate a user (superuser)
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/activate",
    tag = "users",
    security(("BearerAuth" = [])),
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User activated", body = inline(SuccessResponse<UserResponse>)),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
#[put("/api/v1/users/{id:\\d+}/activate")]
pub async fn activate_user_handler(
    _admin: Superuser,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    match data.user_service.activate(UserId::from(path.into_inner())).await {
        Ok(user) => ApiResponse::success("User activated", UserResponse::from(user)),
        Err(err) => map_user_error(err),
    }
}
