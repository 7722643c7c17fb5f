//! Assignment-time validation
//!
//! Rules:
//! - Exact(T): the value's kind is T or a subtype of T
//! - OneOf(Ts): the value satisfies Exact for at least one member
//! - GenericContainer: the value is any mapping; its keys are not checked
//! - Nested(S): the value is an instance of exactly S
//!
//! Raw mappings written to a Nested field never reach this module; the
//! instance engine expands them field by field instead.

use super::errors::{SchemaError, SchemaResult};
use super::types::TypeDescriptor;
use crate::value::Value;

/// Returns true if `value` satisfies `descriptor`
pub fn accepts(descriptor: &TypeDescriptor, value: &Value) -> bool {
    match descriptor {
        TypeDescriptor::Exact(expected) => value.kind().is_a(expected),
        TypeDescriptor::OneOf(members) => {
            let kind = value.kind();
            members.iter().any(|expected| kind.is_a(expected))
        }
        TypeDescriptor::GenericContainer => matches!(value, Value::Map(_)),
        TypeDescriptor::Nested(schema) => match value {
            Value::Struct(instance) => instance.schema() == schema,
            _ => false,
        },
    }
}

/// Validates a value for `field`.
///
/// # Errors
///
/// Returns `SchemaError::TypeMismatch` naming the field, the expected
/// type(s), and the value's runtime type.
pub fn validate(field: &str, descriptor: &TypeDescriptor, value: &Value) -> SchemaResult<()> {
    if accepts(descriptor, value) {
        return Ok(());
    }

    Err(SchemaError::type_mismatch(
        field,
        descriptor.expected_names(),
        value.kind().type_name(),
    ))
}
