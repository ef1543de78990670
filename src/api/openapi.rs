use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::api::schemas::{ErrorResponse, MessageResponse};
use crate::auth::adapter::incoming::web::routes::{
    LoginRequestDto, LoginResponse, RefreshTokenRequestDto, RefreshTokenResponse,
    RegisterUserRequestDto,
};
use crate::demo::adapter::incoming::web::routes::{
    CreateDemoRequestDto, DemoFeaturedRequestDto, DemoPriorityRequestDto, DemoResponse,
    DemoStatusRequestDto, UpdateDemoRequestDto,
};
use crate::demo::application::domain::entities::{DemoStatistics, DemoStatus};
use crate::user::adapter::incoming::web::routes::{
    ChangePasswordRequestDto, UpdateUserRequestDto, UserResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ops Service API",
        version = "1.0.0",
        description = "User accounts and demo resources"
    ),
    paths(
        // Auth endpoints
        crate::auth::adapter::incoming::web::routes::login_user::login_user_handler,
        crate::auth::adapter::incoming::web::routes::register_user::register_user_handler,
        crate::auth::adapter::incoming::web::routes::refresh_token::refresh_token_handler,
        crate::auth::adapter::incoming::web::routes::fetch_user::fetch_user_handler,
        crate::auth::adapter::incoming::web::routes::logout_user::logout_user_handler,

        // User endpoints
        crate::user::adapter::incoming::web::routes::me::get_me_handler,
        crate::user::adapter::incoming::web::routes::me::update_me_handler,
        crate::user::adapter::incoming::web::routes::me::change_password_handler,
        crate::user::adapter::incoming::web::routes::admin::list_users_handler,
        crate::user::adapter::incoming::web::routes::admin::get_user_handler,
        crate::user::adapter::incoming::web::routes::admin::update_user_handler,
        crate::user::adapter::incoming::web::routes::admin::deactivate_user_handler,
        crate::user::adapter::incoming::web::routes::admin::activate_user_handler,

        // Demo endpoints
        crate::demo::adapter::incoming::web::routes::listing::list_demos_handler,
        crate::demo::adapter::incoming::web::routes::listing::featured_demos_handler,
        crate::demo::adapter::incoming::web::routes::listing::my_demos_handler,
        crate::demo::adapter::incoming::web::routes::listing::demo_statistics_handler,
        crate::demo::adapter::incoming::web::routes::manage::create_demo_handler,
        crate::demo::adapter::incoming::web::routes::manage::get_demo_handler,
        crate::demo::adapter::incoming::web::routes::manage::update_demo_handler,
        crate::demo::adapter::incoming::web::routes::manage::delete_demo_handler,
        crate::demo::adapter::incoming::web::routes::manage::update_demo_status_handler,
        crate::demo::adapter::incoming::web::routes::manage::set_demo_featured_handler,
        crate::demo::adapter::incoming::web::routes::manage::update_demo_priority_handler,
    ),
    components(
        schemas(
            ErrorResponse,
            MessageResponse,

            // Auth DTOs
            LoginRequestDto,
            LoginResponse,
            RegisterUserRequestDto,
            RefreshTokenRequestDto,
            RefreshTokenResponse,

            // User DTOs
            UserResponse,
            UpdateUserRequestDto,
            ChangePasswordRequestDto,

            // Demo DTOs
            DemoResponse,
            DemoStatus,
            DemoStatistics,
            CreateDemoRequestDto,
            UpdateDemoRequestDto,
            DemoStatusRequestDto,
            DemoFeaturedRequestDto,
            DemoPriorityRequestDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User management endpoints"),
        (name = "demos", description = "Demo resource endpoints"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /api/v1/auth/login"))
                        .build(),
                ),
            )
        }
    }
}
