pub mod app_state_builder;
pub mod auth_helper;
pub mod fixtures;
pub mod stubs;

pub use app_state_builder::TestAppStateBuilder;
pub use auth_helper::{bearer, bearer_token, token_provider_data, StubTokenProvider};
pub use fixtures::{read_json, sample_demo, sample_user};
pub use stubs::{InMemoryDemoRepository, InMemoryUserRepository, PlainTextHasher};
