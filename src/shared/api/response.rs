// src/shared/api/response.rs
use actix_web::{http::StatusCode, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::shared::crud::PageResult;

/// Envelope wrapped around every JSON body the API returns.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// `data` of a paginated listing.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T: Serialize> From<PageResult<T>> for Paginated<T> {
    fn from(result: PageResult<T>) -> Self {
        Self {
            page: result.page(),
            page_size: result.limit,
            total_pages: result.total_pages(),
            has_next: result.has_next(),
            has_prev: result.has_prev(),
            total: result.total,
            items: result.items,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    fn ok_body(message: &str, data: T) -> Self {
        ApiResponse {
            success: true,
            message: message.to_string(),
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn success(message: &str, data: T) -> HttpResponse {
        HttpResponse::Ok().json(Self::ok_body(message, data))
    }

    pub fn created(message: &str, data: T) -> HttpResponse {
        HttpResponse::Created().json(Self::ok_body(message, data))
    }
}

impl<T: Serialize> ApiResponse<Paginated<T>> {
    pub fn paginated(message: &str, result: PageResult<T>) -> HttpResponse {
        HttpResponse::Ok().json(Self::ok_body(message, Paginated::from(result)))
    }
}

impl ApiResponse<()> {
    /// Success without a `data` member.
    pub fn message(message: &str) -> HttpResponse {
        HttpResponse::Ok().json(ApiResponse::<()> {
            success: true,
            message: message.to_string(),
            data: None,
            error: None,
            timestamp: Utc::now(),
        })
    }

    pub fn error(status: StatusCode, code: &str, message: &str) -> HttpResponse {
        HttpResponse::build(status).json(ApiResponse::<()> {
            success: false,
            message: message.to_string(),
            data: None,
            error: Some(code.to_string()),
            timestamp: Utc::now(),
        })
    }

    pub fn not_found(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::NOT_FOUND, code, message)
    }

    pub fn bad_request(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn forbidden(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::FORBIDDEN, code, message)
    }

    pub fn unauthorized(code: &str, message: &str) -> HttpResponse {
        let mut response = Self::error(StatusCode::UNAUTHORIZED, code, message);
        response.headers_mut().insert(
            actix_web::http::header::WWW_AUTHENTICATE,
            actix_web::http::header::HeaderValue::from_static("Bearer"),
        );
        response
    }

    pub fn conflict(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::CONFLICT, code, message)
    }

    pub fn unprocessable(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::UNPROCESSABLE_ENTITY, code, message)
    }

    pub fn internal_error() -> HttpResponse {
        Self::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An unexpected error occurred",
        )
    }
}
