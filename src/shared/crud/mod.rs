//! Generic persistence helpers shared by every module.
//!
//! [`CrudRepository`] wraps a sea-orm entity with create / get / list / count /
//! update / remove / exists, [`SoftDeleteRepository`] layers the `is_deleted`
//! scoping on top of it. Filters and ordering are expressed by field name and
//! resolved against the entity's columns at query time.

mod filter;
mod page;
mod patch;
mod repository;
mod soft_delete;

pub use filter::{Filter, Filters, OrderBy};
pub use page::{PageRequest, PageResult};
pub use patch::PatchField;
pub use repository::{CrudRepository, RepositoryError, UpdatePayload};
pub use soft_delete::{SoftDeletable, SoftDeleteRepository};
