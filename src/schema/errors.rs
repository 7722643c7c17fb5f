//! Schema error types
//!
//! Error codes:
//! - SHAPE_TYPE_MISMATCH
//! - SHAPE_UNKNOWN_FIELD
//! - SHAPE_NOT_A_PREDICATE

use thiserror::Error;

/// Result type for schema and instance operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised by instance writes and accessors.
///
/// Building a schema never fails; every error here comes from a write,
/// a construction, or an accessor on an instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A value failed its field's type descriptor
    #[error("type mismatch for field '{field}': expected {}, got {actual}", .expected.join(" or "))]
    TypeMismatch {
        /// Field that rejected the value (the nested field for nested writes)
        field: String,
        /// Acceptable type names
        expected: Vec<String>,
        /// Runtime type name of the rejected value
        actual: String,
    },

    /// The schema declares no such field
    #[error("unknown field '{field}' for {schema}")]
    UnknownField { field: String, schema: String },

    /// Predicate requested for a field that is not boolean-typed
    #[error("field '{field}' is not boolean-typed and has no predicate")]
    NotAPredicate { field: String },
}

impl SchemaError {
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: Vec<String>,
        actual: impl Into<String>,
    ) -> Self {
        SchemaError::TypeMismatch {
            field: field.into(),
            expected,
            actual: actual.into(),
        }
    }

    pub fn unknown_field(field: impl Into<String>, schema: impl Into<String>) -> Self {
        SchemaError::UnknownField {
            field: field.into(),
            schema: schema.into(),
        }
    }

    pub fn not_a_predicate(field: impl Into<String>) -> Self {
        SchemaError::NotAPredicate {
            field: field.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::TypeMismatch { .. } => "SHAPE_TYPE_MISMATCH",
            SchemaError::UnknownField { .. } => "SHAPE_UNKNOWN_FIELD",
            SchemaError::NotAPredicate { .. } => "SHAPE_NOT_A_PREDICATE",
        }
    }

    /// Returns the field the error refers to
    pub fn field(&self) -> &str {
        match self {
            SchemaError::TypeMismatch { field, .. }
            | SchemaError::UnknownField { field, .. }
            | SchemaError::NotAPredicate { field } => field,
        }
    }
}
