pub mod api;
pub mod config;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::{auth, demo, user};

use actix_web::{middleware::Logger, web, App, HttpServer};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::openapi::ApiDoc;
use crate::auth::adapter::outgoing::jwt::JwtTokenService;
use crate::auth::application::ports::outgoing::TokenProvider;
use crate::config::AppConfig;
use crate::demo::adapter::outgoing::demo_repository_postgres::DemoRepositoryPostgres;
use crate::demo::application::ports::incoming::use_cases::DemoUseCases;
use crate::demo::application::services::DemoService;
use crate::shared::api::{
    custom_json_config, custom_path_config, custom_query_config, PageLimits,
};
use crate::user::adapter::outgoing::security::BcryptHasher;
use crate::user::adapter::outgoing::user_repository_postgres::UserRepositoryPostgres;
use crate::user::application::ports::incoming::use_cases::UserUseCases;
use crate::user::application::services::UserService;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserUseCases + Send + Sync>,
    pub demo_service: Arc<dyn DemoUseCases + Send + Sync>,
    pub page_limits: PageLimits,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config::load_env_files();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                e.to_string(),
            ));
        }
    };

    info!(
        environment = %config.environment,
        address = %config.bind_address(),
        "Starting application..."
    );

    // Database connection
    let mut opt = ConnectOptions::new(config.database.url.clone());
    opt.max_connections(config.database.pool_size)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(config.database.pool_timeout)
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt).await.map_err(|e| {
        error!(error = %e, "Failed to connect to database");
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string())
    })?;

    Migrator::up(&conn, None).await.map_err(|e| {
        error!(error = %e, "Failed to apply migrations");
        std::io::Error::other(e.to_string())
    })?;

    let db_arc = Arc::new(conn);

    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db_arc));
    let demo_repo = DemoRepositoryPostgres::new(Arc::clone(&db_arc));
    let hasher = BcryptHasher::new(config.bcrypt_cost);

    let user_service = UserService::new(user_repo.clone(), Arc::new(hasher));
    let demo_service = DemoService::new(demo_repo, user_repo);

    let state = AppState {
        user_service: Arc::new(user_service),
        demo_service: Arc::new(demo_service),
        page_limits: config.page_limits,
    };

    let token_provider_arc: Arc<dyn TokenProvider + Send + Sync> =
        Arc::new(JwtTokenService::new(config.jwt.clone()));

    let openapi = ApiDoc::openapi();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider_arc)))
            .app_data(web::Data::new(Arc::clone(&db_arc)))
            .app_data(custom_json_config())
            .app_data(custom_query_config())
            .app_data(custom_path_config())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(init_routes)
    })
    .bind(config.bind_address())?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::register_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::login_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::refresh_token_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::logout_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::fetch_user_handler);
    // Users
    cfg.service(crate::user::adapter::incoming::web::routes::get_me_handler);
    cfg.service(crate::user::adapter::incoming::web::routes::update_me_handler);
    cfg.service(crate::user::adapter::incoming::web::routes::change_password_handler);
    cfg.service(crate::user::adapter::incoming::web::routes::list_users_handler);
    cfg.service(crate::user::adapter::incoming::web::routes::get_user_handler);
    cfg.service(crate::user::adapter::incoming::web::routes::update_user_handler);
    cfg.service(crate::user::adapter::incoming::web::routes::deactivate_user_handler);
    cfg.service(crate::user::adapter::incoming::web::routes::activate_user_handler);
    // Demos: fixed segments before `{demo_id}`
    cfg.service(crate::demo::adapter::incoming::web::routes::list_demos_handler);
    cfg.service(crate::demo::adapter::incoming::web::routes::featured_demos_handler);
    cfg.service(crate::demo::adapter::incoming::web::routes::my_demos_handler);
    cfg.service(crate::demo::adapter::incoming::web::routes::demo_statistics_handler);
    cfg.service(crate::demo::adapter::incoming::web::routes::create_demo_handler);
    cfg.service(crate::demo::adapter::incoming::web::routes::get_demo_handler);
    cfg.service(crate::demo::adapter::incoming::web::routes::update_demo_handler);
    cfg.service(crate::demo::adapter::incoming::web::routes::delete_demo_handler);
    cfg.service(crate::demo::adapter::incoming::web::routes::update_demo_status_handler);
    cfg.service(crate::demo::adapter::incoming::web::routes::set_demo_featured_handler);
    cfg.service(crate::demo::adapter::incoming::web::routes::update_demo_priority_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
