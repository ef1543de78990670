pub mod dto;
pub mod errors;
pub mod listing;
pub mod manage;

pub use dto::{
    CreateDemoRequestDto, DemoFeaturedRequestDto, DemoListQuery, DemoPriorityRequestDto,
    DemoResponse, DemoStatusRequestDto, UpdateDemoRequestDto,
};
pub use listing::{
    demo_statistics_handler, featured_demos_handler, list_demos_handler, my_demos_handler,
};
pub use manage::{
    create_demo_handler, delete_demo_handler, get_demo_handler, set_demo_featured_handler,
    update_demo_handler, update_demo_priority_handler, update_demo_status_handler,
};
