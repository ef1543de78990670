use actix_web::web;
use std::sync::Arc;

use crate::demo::application::ports::incoming::use_cases::DemoUseCases;
use crate::demo::application::services::DemoService;
use crate::shared::api::PageLimits;
use crate::tests::support::stubs::{InMemoryDemoRepository, InMemoryUserRepository, PlainTextHasher};
use crate::user::application::ports::incoming::use_cases::UserUseCases;
use crate::user::application::services::UserService;
use crate::AppState;

/// Builds an [`AppState`] backed by in-memory repositories. Either service can
/// be replaced by a mock.
#[derive(Default)]
pub struct TestAppStateBuilder {
    users: InMemoryUserRepository,
    demos: InMemoryDemoRepository,
    user_service: Option<Arc<dyn UserUseCases + Send + Sync>>,
    demo_service: Option<Arc<dyn DemoUseCases + Send + Sync>>,
    page_limits: Option<PageLimits>,
}

impl TestAppStateBuilder {
    pub fn with_user_repository(mut self, users: InMemoryUserRepository) -> Self {
        self.users = users;
        self
    }

    pub fn with_demo_repository(mut self, demos: InMemoryDemoRepository) -> Self {
        self.demos = demos;
        self
    }

    pub fn with_user_service(mut self, uc: impl UserUseCases + Send + Sync + 'static) -> Self {
        self.user_service = Some(Arc::new(uc));
        self
    }

    pub fn with_demo_service(mut self, uc: impl DemoUseCases + Send + Sync + 'static) -> Self {
        self.demo_service = Some(Arc::new(uc));
        self
    }

    pub fn with_page_limits(mut self, limits: PageLimits) -> Self {
        self.page_limits = Some(limits);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        let user_service = self.user_service.unwrap_or_else(|| {
            Arc::new(UserService::new(
                self.users.clone(),
                Arc::new(PlainTextHasher),
            ))
        });
        let demo_service = self
            .demo_service
            .unwrap_or_else(|| Arc::new(DemoService::new(self.demos, self.users)));

        web::Data::new(AppState {
            user_service,
            demo_service,
            page_limits: self.page_limits.unwrap_or_default(),
        })
    }
}
