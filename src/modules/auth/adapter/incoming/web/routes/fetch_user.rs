use actix_web::{get, Responder};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::CurrentUser;
use crate::shared::api::ApiResponse;
use crate::user::adapter::incoming::web::routes::dto::UserResponse;

/// Current user behind the access token
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Current user", body = inline(SuccessResponse<UserResponse>)),
        (status = 400, description = "Account deactivated", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse),
    )
)]
#[get("/api/v1/auth/me")]
pub async fn fetch_user_handler(user: CurrentUser) -> impl Responder {
    ApiResponse::success("Current user retrieved", UserResponse::from(user.0))
}
