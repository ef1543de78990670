pub mod json_config;
pub mod pagination;
pub mod response;

pub use json_config::{custom_json_config, custom_path_config, custom_query_config};
pub use pagination::{PageLimits, PageQuery};
pub use response::{ApiResponse, Paginated};
