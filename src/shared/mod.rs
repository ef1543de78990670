pub mod api;
pub mod crud;
