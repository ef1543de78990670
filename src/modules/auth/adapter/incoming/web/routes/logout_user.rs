use actix_web::{post, Responder};
use tracing::info;

use crate::api::schemas::{ErrorResponse, MessageResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::shared::api::ApiResponse;

/// Logout
///
/// Tokens are stateless; the client discards them.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "auth",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[post("/api/v1/auth/logout")]
pub async fn logout_user_handler(user: AuthenticatedUser) -> impl Responder {
    info!(user_id = %user.user_id, "User logged out");
    ApiResponse::message("Logged out successfully")
}
