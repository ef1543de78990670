mod demo_use_cases;

#[cfg(test)]
pub use demo_use_cases::MockDemoUseCases;
pub use demo_use_cases::{
    CreateDemoCommand, DemoCommandError, DemoServiceError, DemoUseCases, UpdateDemoCommand,
};
