use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::ports::outgoing::TokenProvider;
use crate::shared::api::ApiResponse;
use crate::user::adapter::incoming::web::routes::dto::UserResponse;
use crate::user::adapter::incoming::web::routes::errors::map_user_error;
use crate::AppState;

/// Login request from client
#[derive(Deserialize, ToSchema)]
pub struct LoginRequestDto {
    #[schema(example = "john@example.com")]
    pub email: String,

    #[schema(example = "pw123456")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// Short-lived access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,

    /// Long-lived refresh token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh_token: String,

    #[schema(example = "bearer")]
    pub token_type: String,

    /// Access token lifetime in seconds
    #[schema(example = 1800)]
    pub expires_in: i64,

    pub user: UserResponse,
}

/// User login
///
/// Authenticates with email and password and returns an access/refresh token pair.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = inline(SuccessResponse<LoginResponse>)),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/v1/auth/login")]
pub async fn login_user_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
    tokens: web::Data<Arc<dyn TokenProvider + Send + Sync>>,
) -> impl Responder {
    let dto = req.into_inner();

    info!(email = %dto.email, "Login attempt");

    let user = match data
        .user_service
        .authenticate(dto.email.trim(), &dto.password)
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!(email = %dto.email, "Login failed: invalid credentials");
            return ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password");
        }
        Err(err) => return map_user_error(err),
    };

    let pair = tokens
        .generate_access_token(user.id)
        .and_then(|access| Ok((access, tokens.generate_refresh_token(user.id)?)));

    match pair {
        Ok((access_token, refresh_token)) => {
            info!(user_id = %user.id, "User logged in successfully");
            ApiResponse::success(
                "Login successful",
                LoginResponse {
                    access_token,
                    refresh_token,
                    token_type: "bearer".to_string(),
                    expires_in: tokens.access_token_ttl(),
                    user: UserResponse::from(user),
                },
            )
        }
        Err(e) => {
            error!(user_id = %user.id, error = %e, "Token generation failed");
            ApiResponse::internal_error()
        }
    }
}
