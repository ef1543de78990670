pub mod demo_repository_postgres;
pub mod sea_orm_entity;
