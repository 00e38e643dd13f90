//! Entity schemas and dynamic field access
//!
//! Filtering and sorting by field name need two things the compiler cannot
//! provide at runtime: the declared type of a dotted property path, and a way
//! to read that path off an entity instance. [`Schema`] supplies the first,
//! [`Queryable`] the second, and [`ResolvedPath`] ties them together as a
//! compiled accessor that both the predicate builder and the sort planner
//! share.

use crate::core::error::QueryError;
use crate::core::field::FieldValue;

/// Static description of an entity type's filterable fields.
#[derive(Debug)]
pub struct Schema {
    /// Entity type name (e.g., "user")
    pub entity: &'static str,

    /// Field definitions, in declaration order
    pub fields: &'static [FieldDef],
}

impl Schema {
    /// Look up a field definition by name
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// One field of a [`Schema`].
#[derive(Debug)]
pub struct FieldDef {
    /// Field name as used in dotted paths
    pub name: &'static str,

    /// Runtime kind of the field's value
    pub kind: FieldKind,

    /// Whether the field is an optional wrapper around `kind`
    pub optional: bool,
}

/// The declared runtime kind of a schema field.
///
/// For optional fields this is the unwrapped kind; nullability lives on
/// [`FieldDef::optional`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    Uuid,
    DateTime,
    /// Enumeration with its variant-name table
    Enum(&'static [&'static str]),
    /// Nested entity with its own schema
    Nested(fn() -> &'static Schema),
}

impl FieldKind {
    /// Name of this kind, for error messages
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Boolean => "boolean",
            FieldKind::Uuid => "uuid",
            FieldKind::DateTime => "datetime",
            FieldKind::Enum(_) => "enum",
            FieldKind::Nested(_) => "nested",
        }
    }

    /// Whether values of this kind are single comparable values
    pub fn is_scalar(&self) -> bool {
        !matches!(self, FieldKind::Nested(_))
    }

    /// Whether `gt`/`ge`/`lt`/`le` comparisons apply to this kind
    pub fn is_orderable(&self) -> bool {
        matches!(
            self,
            FieldKind::String | FieldKind::Integer | FieldKind::Float | FieldKind::DateTime
        )
    }
}

/// Dynamic field access for an entity type.
///
/// Implementations expose a static [`Schema`] plus per-instance reads of leaf
/// fields and nested entities. The [`queryable!`](crate::queryable) macro
/// generates all three methods from a field list.
pub trait Queryable: Send + Sync {
    /// The entity's schema
    fn schema() -> &'static Schema
    where
        Self: Sized;

    /// Read a leaf field by name. Absent optionals read as
    /// [`FieldValue::Null`]; nested fields and unknown names read as `None`.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Borrow a nested entity by field name, if present
    fn nested(&self, name: &str) -> Option<&dyn Queryable> {
        let _ = name;
        None
    }
}

/// Enumeration fields: variant-name table plus conversions by name.
///
/// Parsing is case-sensitive; `from_variant("active")` does not match an
/// `Active` variant. The [`enumerated!`](crate::enumerated) macro generates
/// this for plain unit-variant enums.
pub trait Enumerated: Sized {
    /// All variant names, in declaration order
    const VARIANTS: &'static [&'static str];

    /// The name of this value's variant
    fn as_variant(&self) -> &'static str;

    /// Parse a variant by exact name
    fn from_variant(name: &str) -> Option<Self>;
}

/// A dotted property path resolved against an entity schema.
///
/// Resolution happens once, when a filter or sort is built; reading the value
/// off an entity afterwards is a plain chain of field lookups with no schema
/// search. If any navigation step is absent at read time (an optional nested
/// entity that is `None`), the whole path reads as [`FieldValue::Null`].
#[derive(Debug, Clone)]
pub struct ResolvedPath {
    path: String,
    front: Vec<String>,
    leaf: String,
    kind: FieldKind,
    optional: bool,
}

impl ResolvedPath {
    /// Resolve `path` against `T`'s schema.
    pub fn resolve<T: Queryable>(path: &str) -> Result<Self, QueryError> {
        Self::resolve_in(T::schema(), path)
    }

    /// Resolve `path` against an explicit schema.
    pub fn resolve_in(schema: &'static Schema, path: &str) -> Result<Self, QueryError> {
        let segments: Vec<&str> = path.split('.').collect();
        let mut current = schema;
        let mut front = Vec::new();
        let mut resolved: Option<&'static FieldDef> = None;

        for (i, segment) in segments.iter().enumerate() {
            let def = current.field(segment).ok_or_else(|| {
                QueryError::PropertyNotFound {
                    path: path.to_string(),
                    segment: (*segment).to_string(),
                }
            })?;

            if i + 1 < segments.len() {
                match def.kind {
                    FieldKind::Nested(child) => current = child(),
                    // A scalar cannot be navigated into, so the next
                    // segment is unresolvable on it.
                    _ => {
                        return Err(QueryError::PropertyNotFound {
                            path: path.to_string(),
                            segment: segments[i + 1].to_string(),
                        });
                    }
                }
                front.push((*segment).to_string());
            } else {
                resolved = Some(def);
            }
        }

        // split('.') yields at least one segment, so the loop always runs
        // and the last iteration sets `resolved`.
        let def = resolved.ok_or_else(|| QueryError::PropertyNotFound {
            path: path.to_string(),
            segment: String::new(),
        })?;

        Ok(Self {
            path: path.to_string(),
            front,
            leaf: def.name.to_string(),
            kind: def.kind,
            optional: def.optional,
        })
    }

    /// The original dotted path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Declared kind of the final segment (unwrapped for optionals)
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Whether the final segment is an optional wrapper
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Error unless the path ends on a scalar field.
    pub fn require_scalar(self) -> Result<Self, QueryError> {
        if self.kind.is_scalar() {
            Ok(self)
        } else {
            Err(QueryError::NotScalar { path: self.path })
        }
    }

    /// Read the path's value off an entity instance.
    pub fn value_of(&self, entity: &dyn Queryable) -> FieldValue {
        let mut current = entity;
        for segment in &self.front {
            match current.nested(segment) {
                Some(next) => current = next,
                None => return FieldValue::Null,
            }
        }
        current.field(&self.leaf).unwrap_or(FieldValue::Null)
    }
}
