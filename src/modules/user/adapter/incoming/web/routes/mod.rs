pub mod admin;
pub mod dto;
pub mod errors;
pub mod me;

pub use admin::{
    activate_user_handler, deactivate_user_handler, get_user_handler, list_users_handler,
    update_user_handler,
};
pub use dto::{ChangePasswordRequestDto, UpdateUserRequestDto, UserResponse};
pub use me::{change_password_handler, get_me_handler, update_me_handler};
