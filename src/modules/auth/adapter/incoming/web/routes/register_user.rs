use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::shared::api::ApiResponse;
use crate::user::adapter::incoming::web::routes::dto::UserResponse;
use crate::user::adapter::incoming::web::routes::errors::{map_command_error, map_user_error};
use crate::user::application::ports::incoming::use_cases::CreateUserCommand;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterUserRequestDto {
    #[schema(example = "john@example.com")]
    pub email: String,
    #[schema(example = "johndoe")]
    pub username: Option<String>,
    #[schema(example = "John Doe")]
    pub full_name: Option<String>,
    #[schema(example = "pw123456")]
    pub password: String,
    #[schema(example = "pw123456")]
    pub confirm_password: String,
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = RegisterUserRequestDto,
    responses(
        (status = 201, description = "User registered", body = inline(SuccessResponse<UserResponse>)),
        (status = 400, description = "Password confirmation mismatch", body = ErrorResponse),
        (status = 409, description = "Email or username taken", body = ErrorResponse),
        (status = 422, description = "Invalid input", body = ErrorResponse),
    )
)]
#[post("/api/v1/auth/register")]
pub async fn register_user_handler(
    req: web::Json<RegisterUserRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    if dto.password != dto.confirm_password {
        return ApiResponse::bad_request(
            "PASSWORD_MISMATCH",
            "Password confirmation does not match",
        );
    }

    let command = match CreateUserCommand::new(
        &dto.email,
        dto.username,
        dto.password,
        dto.full_name,
        None,
    ) {
        Ok(cmd) => cmd,
        Err(err) => return map_command_error(err),
    };

    match data.user_service.create_user(command).await {
        Ok(user) => {
            info!(user_id = %user.id, "User registered");
            ApiResponse::created("Registration successful", UserResponse::from(user))
        }
        Err(err) => map_user_error(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    use crate::tests::support::{read_json, InMemoryUserRepository, TestAppStateBuilder};

    fn body(email: &str, confirm: &str) -> serde_json::Value {
        serde_json::json!({
            "email": email,
            "username": "a",
            "full_name": "A",
            "password": "pw123456",
            "confirm_password": confirm,
        })
    }

    #[actix_web::test]
    async fn second_registration_with_same_email_conflicts() {
        let users = InMemoryUserRepository::default();
        let state = TestAppStateBuilder::default()
            .with_user_repository(users.clone())
            .build();
        let app = test::init_service(App::new().app_data(state).service(register_user_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(body("a@x.com", "pw123456"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let json = read_json(resp).await;
        assert_eq!(json["data"]["is_active"], true);
        assert_eq!(json["data"]["is_superuser"], false);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(body("a@x.com", "pw123456"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(read_json(resp).await["error"], "EMAIL_TAKEN");
        assert_eq!(users.len(), 1);
    }

    #[actix_web::test]
    async fn confirmation_mismatch_is_bad_request() {
        let state = TestAppStateBuilder::default().build();
        let app = test::init_service(App::new().app_data(state).service(register_user_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(body("a@x.com", "different1"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(resp).await["error"], "PASSWORD_MISMATCH");
    }

    #[actix_web::test]
    async fn invalid_email_is_unprocessable() {
        let state = TestAppStateBuilder::default().build();
        let app = test::init_service(App::new().app_data(state).service(register_user_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(body("not-an-email", "pw123456"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
