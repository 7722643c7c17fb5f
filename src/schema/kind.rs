//! Runtime type tags
//!
//! Every [`Value`](crate::value::Value) reports one of these tags. Exact
//! field types are recorded as a tag, and assignment checks compare the
//! incoming value's tag against it with [`ValueKind::is_a`].

use std::fmt;
use std::sync::Arc;

use super::types::Schema;
use crate::value::OpaqueType;

/// Closed set of runtime types plus an open `Opaque` tag for external types.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    Nil,
    True,
    False,
    Integer,
    Float,
    Text,
    Symbol,
    Sequence,
    Map,
    /// Instance of one particular schema
    Struct(Schema),
    /// External type with an inheritance chain
    Opaque(Arc<OpaqueType>),
}

impl ValueKind {
    /// Returns true if a value of this kind satisfies `expected`.
    ///
    /// Opaque kinds accept subtypes. Struct kinds require the identical
    /// schema; a structurally equal schema built separately does not match.
    pub fn is_a(&self, expected: &ValueKind) -> bool {
        match (self, expected) {
            (ValueKind::Opaque(actual), ValueKind::Opaque(expected)) => {
                actual.is_subtype_of(expected)
            }
            (ValueKind::Struct(actual), ValueKind::Struct(expected)) => actual.id() == expected.id(),
            (actual, expected) => {
                std::mem::discriminant(actual) == std::mem::discriminant(expected)
            }
        }
    }

    /// Human-readable type name used in error messages
    pub fn type_name(&self) -> String {
        match self {
            ValueKind::Nil => "Nil".into(),
            ValueKind::True => "True".into(),
            ValueKind::False => "False".into(),
            ValueKind::Integer => "Integer".into(),
            ValueKind::Float => "Float".into(),
            ValueKind::Text => "String".into(),
            ValueKind::Symbol => "Symbol".into(),
            ValueKind::Sequence => "Sequence".into(),
            ValueKind::Map => "Map".into(),
            ValueKind::Struct(schema) => schema.display_name().to_string(),
            ValueKind::Opaque(ty) => ty.name().to_string(),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}
