use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use futures::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    sync::Arc,
};

use crate::auth::application::ports::outgoing::{TokenProvider, TokenType};
use crate::shared::api::ApiResponse;
use crate::user::application::domain::entities::{User, UserId};
use crate::user::application::ports::incoming::use_cases::UserServiceError;
use crate::AppState;

/// Caller identified by a valid access token. The user row is not loaded.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ActixError> {
    let jwt_service = req
        .app_data::<web::Data<Arc<dyn TokenProvider + Send + Sync>>>()
        .ok_or_else(|| create_api_error(ApiResponse::internal_error()))?;

    let token = extract_token_from_header(req).ok_or_else(|| {
        create_api_error(ApiResponse::unauthorized(
            "MISSING_AUTH_HEADER",
            "Missing or invalid authorization header",
        ))
    })?;

    let claims = jwt_service.verify_token(&token).map_err(|_| {
        create_api_error(ApiResponse::unauthorized(
            "INVALID_TOKEN",
            "Invalid or expired token",
        ))
    })?;

    if claims.token_type != TokenType::Access {
        return Err(create_api_error(ApiResponse::unauthorized(
            "INVALID_TOKEN_TYPE",
            "Invalid token type",
        )));
    }

    let user_id = claims.user_id().map_err(|_| {
        create_api_error(ApiResponse::unauthorized(
            "INVALID_TOKEN",
            "Invalid or expired token",
        ))
    })?;

    Ok(AuthenticatedUser { user_id })
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

/// Authenticated caller whose account exists and may act.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> UserId {
        self.0.id
    }
}

async fn load_current_user(
    auth: AuthenticatedUser,
    state: Option<web::Data<AppState>>,
) -> Result<CurrentUser, ActixError> {
    let state = state.ok_or_else(|| create_api_error(ApiResponse::internal_error()))?;

    let user = match state.user_service.get_user(auth.user_id).await {
        Ok(user) => user,
        Err(UserServiceError::UserNotFound) => {
            return Err(create_api_error(ApiResponse::not_found(
                "USER_NOT_FOUND",
                "User not found",
            )));
        }
        Err(e) => {
            tracing::error!(user_id = %auth.user_id, error = %e, "Failed to load caller");
            return Err(create_api_error(ApiResponse::internal_error()));
        }
    };

    if !user.can_sign_in() {
        return Err(create_api_error(ApiResponse::bad_request(
            "USER_INACTIVE",
            "User account is deactivated",
        )));
    }

    Ok(CurrentUser(user))
}

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let auth = authenticate(req);
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move { load_current_user(auth?, state).await })
    }
}

/// Current user holding the superuser flag.
#[derive(Debug, Clone)]
pub struct Superuser(pub User);

impl FromRequest for Superuser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let current = CurrentUser::from_request(req, payload);

        Box::pin(async move {
            let CurrentUser(user) = current.await?;
            if !user.is_superuser {
                return Err(create_api_error(ApiResponse::forbidden(
                    "INSUFFICIENT_PERMISSIONS",
                    "Insufficient permissions",
                )));
            }
            Ok(Superuser(user))
        })
    }
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{get, http::StatusCode, test, App, HttpResponse, Responder};

    use crate::tests::support::{
        bearer, bearer_token, sample_user, token_provider_data, InMemoryUserRepository,
        StubTokenProvider, TestAppStateBuilder,
    };

    #[get("/whoami")]
    async fn whoami(user: AuthenticatedUser) -> impl Responder {
        HttpResponse::Ok().body(user.user_id.to_string())
    }

    #[get("/me")]
    async fn me(user: CurrentUser) -> impl Responder {
        HttpResponse::Ok().body(user.0.email)
    }

    #[get("/admin")]
    async fn admin(user: Superuser) -> impl Responder {
        HttpResponse::Ok().body(user.0.email)
    }

    #[actix_web::test]
    async fn missing_header_is_unauthorized_with_challenge() {
        let app = test::init_service(App::new().app_data(token_provider_data()).service(whoami)).await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers().get("www-authenticate").unwrap(), "Bearer");
    }

    #[actix_web::test]
    async fn refresh_token_is_not_accepted_for_access() {
        let app = test::init_service(App::new().app_data(token_provider_data()).service(whoami)).await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(bearer_token(&StubTokenProvider::refresh_token_for(UserId::from(1))))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn access_token_yields_user_id() {
        let app = test::init_service(App::new().app_data(token_provider_data()).service(whoami)).await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(bearer(UserId::from(9)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "9");
    }

    #[actix_web::test]
    async fn unknown_user_is_not_found() {
        let state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(token_provider_data())
                .service(me),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(bearer(UserId::from(404)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn inactive_user_is_bad_request() {
        let mut inactive = sample_user(1, "a@x.com");
        inactive.is_active = false;
        let users = InMemoryUserRepository::with_users(vec![inactive]);

        let state = TestAppStateBuilder::default()
            .with_user_repository(users)
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(token_provider_data())
                .service(me),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(bearer(UserId::from(1)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn regular_user_cannot_pass_superuser_guard() {
        let users = InMemoryUserRepository::with_users(vec![sample_user(1, "a@x.com")]);
        let state = TestAppStateBuilder::default()
            .with_user_repository(users)
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(token_provider_data())
                .service(admin),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(bearer(UserId::from(1)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn superuser_passes_guard() {
        let mut root = sample_user(1, "root@x.com");
        root.is_superuser = true;
        let state = TestAppStateBuilder::default()
            .with_user_repository(InMemoryUserRepository::with_users(vec![root]))
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(token_provider_data())
                .service(admin),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(bearer(UserId::from(1)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "root@x.com");
    }
}
