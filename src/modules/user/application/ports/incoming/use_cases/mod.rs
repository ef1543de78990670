mod user_use_cases;

#[cfg(test)]
pub use user_use_cases::MockUserUseCases;
pub use user_use_cases::{
    AccountFlags, ChangePasswordCommand, CreateUserCommand, UpdateUserCommand, UserCommandError,
    UserServiceError, UserUseCases,
};
