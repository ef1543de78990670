use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::ports::outgoing::{TokenError, TokenProvider};
use crate::shared::api::ApiResponse;

#[derive(Deserialize, ToSchema)]
pub struct RefreshTokenRequestDto {
    pub refresh_token: String,
}

#[derive(Serialize, ToSchema)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    #[schema(example = 1800)]
    pub expires_in: i64,
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "auth",
    request_body = RefreshTokenRequestDto,
    responses(
        (status = 200, description = "New access token", body = inline(SuccessResponse<RefreshTokenResponse>)),
        (status = 401, description = "Expired, invalid or non-refresh token", body = ErrorResponse),
    )
)]
#[post("/api/v1/auth/refresh")]
pub async fn refresh_token_handler(
    req: web::Json<RefreshTokenRequestDto>,
    tokens: web::Data<Arc<dyn TokenProvider + Send + Sync>>,
) -> impl Responder {
    let refresh_token = req.into_inner().refresh_token;

    match tokens.refresh_access_token(&refresh_token) {
        Ok(access_token) => {
            info!("Access token refreshed");
            ApiResponse::success(
                "Token refreshed",
                RefreshTokenResponse {
                    access_token,
                    token_type: "bearer".to_string(),
                    expires_in: tokens.access_token_ttl(),
                },
            )
        }
        Err(TokenError::InvalidTokenType(expected)) => {
            warn!(expected = expected.as_str(), "Token refresh failed: wrong token type");
            ApiResponse::unauthorized("INVALID_TOKEN_TYPE", "A refresh token is required")
        }
        Err(TokenError::EncodingError(e)) => {
            error!(error = %e, "Token generation failed during refresh");
            ApiResponse::internal_error()
        }
        Err(e) => {
            warn!(error = %e, "Token refresh failed");
            ApiResponse::unauthorized(
                "INVALID_REFRESH_TOKEN",
                "Refresh token is expired or invalid",
            )
        }
    }
}
