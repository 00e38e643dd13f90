//! Macros for reducing boilerplate when defining entities
//!
//! These macros generate the repetitive trait implementations entity types
//! need to participate in dynamic querying: a static schema, leaf-field
//! reads and nested-entity navigation.
//!
//! # Field kinds
//!
//! Simple kinds are bare words; compound kinds are parenthesized:
//!
//! | spec                  | Rust field type            |
//! |-----------------------|----------------------------|
//! | `string`              | `String`                   |
//! | `integer`             | `i64` (or anything `Into<i64>`) |
//! | `float`               | `f64` (or anything `Into<f64>`) |
//! | `boolean`             | `bool`                     |
//! | `uuid`                | `Uuid`                     |
//! | `datetime`            | `DateTime<Utc>`            |
//! | `(enum Status)`       | an [`Enumerated`] enum     |
//! | `(nested Address)`    | another `queryable!` type  |
//! | `(option <kind>)`     | `Option<...>` of any of the above |
//!
//! [`Enumerated`]: crate::core::schema::Enumerated
//!
//! # Example
//!
//! ```rust,ignore
//! enumerated!(Status { Active, Inactive });
//!
//! queryable!(Address, "address", {
//!     city: string,
//!     postal_code: (option string),
//! });
//!
//! queryable!(Customer, "customer", {
//!     name: string,
//!     age: integer,
//!     status: (enum Status),
//!     address: (nested Address),
//! });
//! ```

/// Implement [`Queryable`](crate::core::schema::Queryable) for a struct from
/// a field list.
#[macro_export]
macro_rules! queryable {
    ($ty:ident, $entity:literal, { $($fname:ident : $fkind:tt),* $(,)? }) => {
        impl $crate::core::schema::Queryable for $ty {
            fn schema() -> &'static $crate::core::schema::Schema {
                static SCHEMA: $crate::core::schema::Schema = $crate::core::schema::Schema {
                    entity: $entity,
                    fields: &[
                        $(
                            $crate::core::schema::FieldDef {
                                name: stringify!($fname),
                                kind: $crate::queryable!(@kind $fkind),
                                optional: $crate::queryable!(@optional $fkind),
                            },
                        )*
                    ],
                };
                &SCHEMA
            }

            fn field(&self, name: &str) -> Option<$crate::core::field::FieldValue> {
                match name {
                    $( stringify!($fname) => $crate::queryable!(@value self, $fname, $fkind), )*
                    _ => None,
                }
            }

            fn nested(&self, name: &str) -> Option<&dyn $crate::core::schema::Queryable> {
                match name {
                    $( stringify!($fname) => $crate::queryable!(@nested self, $fname, $fkind), )*
                    _ => None,
                }
            }
        }
    };

    // ===== kind tag =====
    (@kind string) => { $crate::core::schema::FieldKind::String };
    (@kind integer) => { $crate::core::schema::FieldKind::Integer };
    (@kind float) => { $crate::core::schema::FieldKind::Float };
    (@kind boolean) => { $crate::core::schema::FieldKind::Boolean };
    (@kind uuid) => { $crate::core::schema::FieldKind::Uuid };
    (@kind datetime) => { $crate::core::schema::FieldKind::DateTime };
    (@kind option $($rest:tt)+) => { $crate::queryable!(@kind $($rest)+) };
    (@kind enum $t:ty) => {
        $crate::core::schema::FieldKind::Enum(<$t as $crate::core::schema::Enumerated>::VARIANTS)
    };
    (@kind nested $t:ty) => {
        $crate::core::schema::FieldKind::Nested(<$t as $crate::core::schema::Queryable>::schema)
    };
    (@kind ( $($inner:tt)+ )) => { $crate::queryable!(@kind $($inner)+) };

    // ===== optional flag =====
    (@optional ( $($inner:tt)+ )) => { $crate::queryable!(@optional $($inner)+) };
    (@optional option $($rest:tt)+) => { true };
    (@optional $($rest:tt)+) => { false };

    // ===== leaf-field read =====
    (@value $s:ident, $f:ident, ( $($inner:tt)+ )) => {
        $crate::queryable!(@value $s, $f, $($inner)+)
    };
    (@value $s:ident, $f:ident, option nested $t:ty) => { None };
    (@value $s:ident, $f:ident, nested $t:ty) => { None };
    (@value $s:ident, $f:ident, option $($rest:tt)+) => {
        match &$s.$f {
            Some(v) => $crate::queryable!(@value_ref v, $($rest)+),
            None => Some($crate::core::field::FieldValue::Null),
        }
    };
    (@value $s:ident, $f:ident, $($k:tt)+) => {{
        let v = &$s.$f;
        $crate::queryable!(@value_ref v, $($k)+)
    }};

    (@value_ref $v:ident, string) => {
        Some($crate::core::field::FieldValue::String($v.clone()))
    };
    (@value_ref $v:ident, integer) => {
        Some($crate::core::field::FieldValue::Integer((*$v).into()))
    };
    (@value_ref $v:ident, float) => {
        Some($crate::core::field::FieldValue::Float((*$v).into()))
    };
    (@value_ref $v:ident, boolean) => {
        Some($crate::core::field::FieldValue::Boolean(*$v))
    };
    (@value_ref $v:ident, uuid) => {
        Some($crate::core::field::FieldValue::Uuid(*$v))
    };
    (@value_ref $v:ident, datetime) => {
        Some($crate::core::field::FieldValue::DateTime(*$v))
    };
    (@value_ref $v:ident, enum $t:ty) => {
        Some($crate::core::field::FieldValue::Enum(
            <$t as $crate::core::schema::Enumerated>::as_variant($v).to_string(),
        ))
    };

    // ===== nested-entity read =====
    (@nested $s:ident, $f:ident, ( $($inner:tt)+ )) => {
        $crate::queryable!(@nested $s, $f, $($inner)+)
    };
    (@nested $s:ident, $f:ident, option nested $t:ty) => {
        $s.$f.as_ref().map(|v| v as &dyn $crate::core::schema::Queryable)
    };
    (@nested $s:ident, $f:ident, nested $t:ty) => {
        Some(&$s.$f as &dyn $crate::core::schema::Queryable)
    };
    (@nested $s:ident, $f:ident, $($k:tt)+) => { None };
}

/// Implement [`Enumerated`](crate::core::schema::Enumerated) for a plain
/// unit-variant enum.
#[macro_export]
macro_rules! enumerated {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::core::schema::Enumerated for $ty {
            const VARIANTS: &'static [&'static str] = &[$(stringify!($variant)),+];

            fn as_variant(&self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($variant), )+
                }
            }

            fn from_variant(name: &str) -> Option<Self> {
                match name {
                    $( stringify!($variant) => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }
    };
}
