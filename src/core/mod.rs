//! Core module containing fundamental traits and types for the toolkit

pub mod entity;
pub mod error;
pub mod field;
pub mod page;
pub mod repository;
pub mod schema;
pub mod store;
pub mod validation;

pub use entity::Entity;
pub use error::{SiftError, SiftResult};
pub use field::{FieldFormat, FieldValue};
pub use page::{PageMeta, PageRequest, PagedResult};
pub use repository::Repository;
pub use schema::{Enumerated, FieldDef, FieldKind, Queryable, ResolvedPath, Schema};
pub use store::EntitySource;
pub use validation::Validate;
