pub mod demo_repository;

pub use demo_repository::{DemoChanges, DemoRepository, DemoRepositoryError, DemoSearch, NewDemo};
