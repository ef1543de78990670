use actix_web::{delete, get, post, put, web, Responder};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::CurrentUser;
use crate::demo::application::domain::entities::DemoId;
use crate::demo::application::ports::incoming::use_cases::{CreateDemoCommand, UpdateDemoCommand};
use crate::shared::api::ApiResponse;
use crate::AppState;

use super::dto::{
    CreateDemoRequestDto, DemoFeaturedRequestDto, DemoPriorityRequestDto, DemoResponse,
    DemoStatusRequestDto, UpdateDemoRequestDto,
};
use super::errors::{map_command_error, map_demo_error};

//
// ──────────────────────────────────────────────────────────
// Create / read
// ──────────────────────────────────────────────────────────
//

/// Create a demo owned by the caller
#[utoipa::path(
    post,
    path = "/api/v1/demos",
    tag = "demos",
    security(("BearerAuth" = [])),
    request_body = CreateDemoRequestDto,
    responses(
        (status = 201, description = "Demo created", body = inline(SuccessResponse<DemoResponse>)),
        (status = 409, description = "Name already used by a live demo", body = ErrorResponse),
        (status = 422, description = "Invalid name or status", body = ErrorResponse),
    )
)]
#[post("/api/v1/demos")]
pub async fn create_demo_handler(
    user: CurrentUser,
    data: web::Data<AppState>,
    payload: web::Json<CreateDemoRequestDto>,
) -> impl Responder {
    let dto = payload.into_inner();

    let command = match CreateDemoCommand::new(
        &dto.name,
        dto.description,
        dto.status,
        dto.priority,
        dto.is_featured,
    ) {
        Ok(cmd) => cmd,
        Err(err) => return map_command_error(err),
    };

    match data.demo_service.create_demo(user.id(), command).await {
        Ok(demo) => ApiResponse::created("Demo created", DemoResponse::from(demo)),
        Err(err) => map_demo_error(err),
    }
}

/// Get a demo
#[utoipa::path(
    get,
    path = "/api/v1/demos/{demo_id}",
    tag = "demos",
    params(("demo_id" = i64, Path, description = "Demo id")),
    responses(
        (status = 200, description = "Demo", body = inline(SuccessResponse<DemoResponse>)),
        (status = 404, description = "Missing or deleted", body = ErrorResponse),
    )
)]
#[get("/api/v1/demos/{demo_id:\\d+}")]
pub async fn get_demo_handler(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match data.demo_service.get_demo(DemoId::from(path.into_inner())).await {
        Ok(demo) => ApiResponse::success("Demo retrieved", DemoResponse::from(demo)),
        Err(err) => map_demo_error(err),
    }
}

//
// ──────────────────────────────────────────────────────────
// Owner-only changes
// ──────────────────────────────────────────────────────────
//

/// Update a demo (owner only)
#[utoipa::path(
    put,
    path = "/api/v1/demos/{demo_id}",
    tag = "demos",
    security(("BearerAuth" = [])),
    params(("demo_id" = i64, Path, description = "Demo id")),
    request_body = UpdateDemoRequestDto,
    responses(
        (status = 200, description = "Demo updated", body = inline(SuccessResponse<DemoResponse>)),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
        (status = 404, description = "Missing or deleted", body = ErrorResponse),
        (status = 409, description = "Name already used", body = ErrorResponse),
    )
)]
#[put("/api/v1/demos/{demo_id:\\d+}")]
pub async fn update_demo_handler(
    user: CurrentUser,
    data: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateDemoRequestDto>,
) -> impl Responder {
    let dto = payload.into_inner();

    let command = match UpdateDemoCommand::new(
        dto.name,
        dto.description,
        dto.status,
        dto.priority,
        dto.is_featured,
    ) {
        Ok(cmd) => cmd,
        Err(err) => return map_command_error(err),
    };

    let id = DemoId::from(path.into_inner());
    match data.demo_service.update_demo(id, user.id(), command).await {
        Ok(demo) => ApiResponse::success("Demo updated", DemoResponse::from(demo)),
        Err(err) => map_demo_error(err),
    }
}

/// Soft-delete a demo (owner only)
#[utoipa::path(
    delete,
    path = "/api/v1/demos/{demo_id}",
    tag = "demos",
    security(("BearerAuth" = [])),
    params(("demo_id" = i64, Path, description = "Demo id")),
    responses(
        (status = 200, description = "Demo deleted", body = inline(SuccessResponse<DemoResponse>)),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
        (status = 404, description = "Missing or deleted", body = ErrorResponse),
    )
)]
#[delete("/api/v1/demos/{demo_id:\\d+}")]
pub async fn delete_demo_handler(
    user: CurrentUser,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    let id = DemoId::from(path.into_inner());
    match data.demo_service.delete_demo(id, user.id()).await {
        Ok(demo) => ApiResponse::success("Demo deleted", DemoResponse::from(demo)),
        Err(err) => map_demo_error(err),
    }
}

/// Change demo status (owner only)
#[utoipa::path(
    put,
    path = "/api/v1/demos/{demo_id}/status",
    tag = "demos",
    security(("BearerAuth" = [])),
    params(("demo_id" = i64, Path, description = "Demo id")),
    request_body = DemoStatusRequestDto,
    responses(
        (status = 200, description = "Status changed", body = inline(SuccessResponse<DemoResponse>)),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
        (status = 422, description = "Unknown status", body = ErrorResponse),
    )
)]
#[put("/api/v1/demos/{demo_id:\\d+}/status")]
pub async fn update_demo_status_handler(
    user: CurrentUser,
    data: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<DemoStatusRequestDto>,
) -> impl Responder {
    let id = DemoId::from(path.into_inner());
    let status = payload.into_inner().status;

    match data.demo_service.update_demo_status(id, user.id(), status).await {
        Ok(demo) => ApiResponse::success("Demo status updated", DemoResponse::from(demo)),
        Err(err) => map_demo_error(err),
    }
}

/// Set or clear the featured flag (owner only)
#[utoipa::path(
    put,
    path = "/api/v1/demos/{demo_id}/featured",
    tag = "demos",
    security(("BearerAuth" = [])),
    params(("demo_id" = i64, Path, description = "Demo id")),
    request_body = DemoFeaturedRequestDto,
    responses(
        (status = 200, description = "Featured flag changed", body = inline(SuccessResponse<DemoResponse>)),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
    )
)]
#[put("/api/v1/demos/{demo_id:\\d+}/featured")]
pub async fn set_demo_featured_handler(
    user: CurrentUser,
    data: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<DemoFeaturedRequestDto>,
) -> impl Responder {
    let id = DemoId::from(path.into_inner());
    let is_featured = payload.into_inner().is_featured;

    match data
        .demo_service
        .set_demo_featured(id, user.id(), is_featured)
        .await
    {
        Ok(demo) => ApiResponse::success("Demo featured flag updated", DemoResponse::from(demo)),
        Err(err) => map_demo_error(err),
    }
}

/// Change demo priority (owner only)
#[utoipa::path(
    put,
    path = "/api/v1/demos/{demo_id}/priority",
    tag = "demos",
    security(("BearerAuth" = [])),
    params(("demo_id" = i64, Path, description = "Demo id")),
    request_body = DemoPriorityRequestDto,
    responses(
        (status = 200, description = "Priority changed", body = inline(SuccessResponse<DemoResponse>)),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
    )
)]
#[put("/api/v1/demos/{demo_id:\\d+}/priority")]
pub async fn update_demo_priority_handler(
    user: CurrentUser,
    data: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<DemoPriorityRequestDto>,
) -> impl Responder {
    let id = DemoId::from(path.into_inner());
    let priority = payload.into_inner().priority;

    match data
        .demo_service
        .update_demo_priority(id, user.id(), priority)
        .await
    {
        Ok(demo) => ApiResponse::success("Demo priority updated", DemoResponse::from(demo)),
        Err(err) => map_demo_error(err),
    }
}
