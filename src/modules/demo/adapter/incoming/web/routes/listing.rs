use actix_web::{get, web, Responder};

use crate::api::schemas::{ErrorResponse, PaginatedData, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::CurrentUser;
use crate::demo::application::domain::entities::{DemoStatistics, DemoStatus};
use crate::demo::application::ports::incoming::use_cases::DemoServiceError;
use crate::demo::application::ports::outgoing::DemoSearch;
use crate::shared::api::{ApiResponse, PageQuery};
use crate::user::application::domain::entities::UserId;
use crate::AppState;

use super::dto::{DemoListQuery, DemoResponse};
use super::errors::map_demo_error;

/// Search demos
///
/// Public. Highest priority first; deleted demos never appear.
#[utoipa::path(
    get,
    path = "/api/v1/demos",
    tag = "demos",
    params(DemoListQuery),
    responses(
        (status = 200, description = "Page of demos", body = inline(SuccessResponse<PaginatedData<DemoResponse>>)),
        (status = 422, description = "Unknown status filter", body = ErrorResponse),
    )
)]
#[get("/api/v1/demos")]
pub async fn list_demos_handler(
    data: web::Data<AppState>,
    query: web::Query<DemoListQuery>,
) -> impl Responder {
    let query = query.into_inner();
    let page = query.page().to_request(data.page_limits);

    let status = match query.status.as_deref().map(str::parse::<DemoStatus>).transpose() {
        Ok(status) => status,
        Err(e) => return map_demo_error(DemoServiceError::InvalidStatus(e.0)),
    };

    let criteria = DemoSearch {
        name: query.name.filter(|n| !n.is_empty()),
        status,
        is_featured: query.is_featured,
        owner_id: query.owner_id.map(UserId::from),
    };

    match data.demo_service.search_demos(criteria, page).await {
        Ok(result) => ApiResponse::paginated("Demos retrieved", result.map(DemoResponse::from)),
        Err(err) => map_demo_error(err),
    }
}

/// Featured demos
#[utoipa::path(
    get,
    path = "/api/v1/demos/featured",
    tag = "demos",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of featured demos", body = inline(SuccessResponse<PaginatedData<DemoResponse>>)),
    )
)]
#[get("/api/v1/demos/featured")]
pub async fn featured_demos_handler(
    data: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    let page = query.into_inner().to_request(data.page_limits);

    match data.demo_service.get_featured_demos(page).await {
        Ok(result) => {
            ApiResponse::paginated("Featured demos retrieved", result.map(DemoResponse::from))
        }
        Err(err) => map_demo_error(err),
    }
}

/// Demos owned by the caller
#[utoipa::path(
    get,
    path = "/api/v1/demos/my",
    tag = "demos",
    security(("BearerAuth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Page of the caller's demos", body = inline(SuccessResponse<PaginatedData<DemoResponse>>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[get("/api/v1/demos/my")]
pub async fn my_demos_handler(
    user: CurrentUser,
    data: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    let page = query.into_inner().to_request(data.page_limits);

    match data.demo_service.get_user_demos(user.id(), page).await {
        Ok(result) => ApiResponse::paginated("Your demos retrieved", result.map(DemoResponse::from)),
        Err(err) => map_demo_error(err),
    }
}

/// Demo counts by status
#[utoipa::path(
    get,
    path = "/api/v1/demos/statistics",
    tag = "demos",
    responses(
        (status = 200, description = "Counts over non-deleted demos", body = inline(SuccessResponse<DemoStatistics>)),
    )
)]
#[get("/api/v1/demos/statistics")]
pub async fn demo_statistics_handler(data: web::Data<AppState>) -> impl Responder {
    match data.demo_service.get_statistics().await {
        Ok(stats) => ApiResponse::success("Demo statistics retrieved", stats),
        Err(err) => map_demo_error(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    use crate::tests::support::{
        bearer, read_json, sample_demo, sample_user, token_provider_data, InMemoryDemoRepository,
        InMemoryUserRepository, TestAppStateBuilder,
    };

    // ============================================================
    // Helpers
    // ============================================================

    fn seeded_demos() -> InMemoryDemoRepository {
        let mut featured = sample_demo(2, "beta", 1);
        featured.is_featured = true;
        featured.priority = 9;

        let mut pending = sample_demo(3, "gamma", 2);
        pending.status = DemoStatus::Pending;

        let mut deleted = sample_demo(4, "alpha-old", 1);
        deleted.is_deleted = true;

        InMemoryDemoRepository::with_demos(vec![
            sample_demo(1, "alpha", 1),
            featured,
            pending,
            deleted,
        ])
    }

    fn users() -> InMemoryUserRepository {
        InMemoryUserRepository::with_users(vec![
            sample_user(1, "a@x.com"),
            sample_user(2, "b@x.com"),
        ])
    }

    // ============================================================
    // Tests
    // ============================================================

    #[actix_web::test]
    async fn public_listing_hides_deleted_and_orders_by_priority() {
        let state = TestAppStateBuilder::default()
            .with_demo_repository(seeded_demos())
            .build();
        let app = test::init_service(App::new().app_data(state).service(list_demos_handler)).await;

        let req = test::TestRequest::get().uri("/api/v1/demos").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let json = read_json(resp).await;
        assert_eq!(json["data"]["total"], 3);
        assert_eq!(json["data"]["items"][0]["name"], "beta");
    }

    #[actix_web::test]
    async fn listing_filters_by_name_substring_and_owner() {
        let state = TestAppStateBuilder::default()
            .with_demo_repository(seeded_demos())
            .build();
        let app = test::init_service(App::new().app_data(state).service(list_demos_handler)).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/demos?name=alp&owner_id=1")
            .to_request();
        let json = read_json(test::call_service(&app, req).await).await;

        assert_eq!(json["data"]["total"], 1);
        assert_eq!(json["data"]["items"][0]["name"], "alpha");
    }

    #[actix_web::test]
    async fn listing_with_unknown_status_is_unprocessable() {
        let state = TestAppStateBuilder::default().build();
        let app = test::init_service(App::new().app_data(state).service(list_demos_handler)).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/demos?status=archived")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(read_json(resp).await["error"], "INVALID_STATUS");
    }

    #[actix_web::test]
    async fn featured_lists_only_featured() {
        let state = TestAppStateBuilder::default()
            .with_demo_repository(seeded_demos())
            .build();
        let app =
            test::init_service(App::new().app_data(state).service(featured_demos_handler)).await;

        let req = test::TestRequest::get().uri("/api/v1/demos/featured").to_request();
        let json = read_json(test::call_service(&app, req).await).await;

        assert_eq!(json["data"]["total"], 1);
        assert_eq!(json["data"]["items"][0]["id"], 2);
    }

    #[actix_web::test]
    async fn my_demos_requires_token_and_scopes_to_caller() {
        let state = TestAppStateBuilder::default()
            .with_user_repository(users())
            .with_demo_repository(seeded_demos())
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(token_provider_data())
                .service(my_demos_handler),
        )
        .await;

        let anonymous = test::TestRequest::get().uri("/api/v1/demos/my").to_request();
        let resp = test::call_service(&app, anonymous).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/v1/demos/my")
            .insert_header(bearer(UserId::from(2)))
            .to_request();
        let json = read_json(test::call_service(&app, req).await).await;

        assert_eq!(json["data"]["total"], 1);
        assert_eq!(json["data"]["items"][0]["name"], "gamma");
    }

    #[actix_web::test]
    async fn statistics_count_live_demos() {
        let state = TestAppStateBuilder::default()
            .with_demo_repository(seeded_demos())
            .build();
        let app =
            test::init_service(App::new().app_data(state).service(demo_statistics_handler)).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/demos/statistics")
            .to_request();
        let json = read_json(test::call_service(&app, req).await).await;

        assert_eq!(json["data"]["total"], 3);
        assert_eq!(json["data"]["active"], 2);
        assert_eq!(json["data"]["pending"], 1);
        assert_eq!(json["data"]["inactive"], 0);
        assert_eq!(json["data"]["featured"], 1);
    }
}
