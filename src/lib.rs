//! # Sift
//!
//! An entity repository toolkit whose core is a runtime query-composition
//! engine: composable boolean specifications, string-driven predicate
//! building, dynamic multi-key sorting and paged execution.
//!
//! ## Features
//!
//! - **Specifications**: immutable predicate wrappers composable with
//!   `and`/`or` (or the `&`/`|` operators) under short-circuit semantics
//! - **String-driven filters**: `(field, operator, value)` triples become
//!   typed predicates, coerced per field type, with nested dotted paths
//! - **Dynamic sorting**: `"last_name, age DESC"` descriptors, first clause
//!   primary and the rest stable tie-breaks
//! - **Deferred execution**: `Query<T>` accumulates filter/sort/skip/take
//!   operations and touches the data source only at `materialize`/`count`
//! - **Paged results**: page window plus an independent total count and
//!   derived page metadata
//! - **Macro-based schemas**: `queryable!`/`enumerated!` generate the
//!   reflection plumbing entities need to be filterable and sortable
//! - **Async repositories**: storage-agnostic CRUD boundary with an
//!   insertion-ordered in-memory backend included
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sift::prelude::*;
//!
//! queryable!(Person, "person", {
//!     name: string,
//!     age: integer,
//!     address: (nested Address),
//! });
//!
//! // Typed specification, composed with a string-built one
//! let adults = Specification::new(|p: &Person| p.age >= 18);
//! let locals = Specification::<Person>::parse("address.city", "eq", "Lisbon")?;
//! let filter = adults & locals;
//!
//! let page = PageRequest::new(0, 25).with_sorter("name, age DESC");
//! let result = read_page(repo.query().await?, Some(&filter), Some(&page))?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod query;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::Entity,
        error::{
            ConfigError, QueryError, SiftError, SiftResult, StorageError, ValidationError,
        },
        field::{FieldFormat, FieldValue},
        page::{PageMeta, PageRequest, PagedResult},
        repository::Repository,
        schema::{Enumerated, FieldDef, FieldKind, Queryable, Schema},
        store::EntitySource,
        validation::Validate,
    };

    // === Query Engine ===
    pub use crate::query::{
        builder::build_spec,
        executor::read_page,
        expr::{CompareOp, FilterExpr, FilterOperator, StringMatchOp},
        lazy::Query,
        sort::{SortDescriptor, SortDirection},
        specification::Specification,
    };

    // === Macros ===
    pub use crate::{enumerated, queryable};

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryRepository;

    // === Config ===
    pub use crate::config::{PagingConfig, SiftConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
