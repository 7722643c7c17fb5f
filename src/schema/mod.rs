//! Schema subsystem for shapegen
//!
//! A schema is derived once from a sample mapping and enforced on every
//! write to the instances built from it.
//!
//! # Design Principles
//!
//! - One sample, trusted completely
//! - Schemas are immutable and shared by handle
//! - Validation happens at assignment time, field by field
//! - Unset fields are exempt until first written

mod builder;
mod errors;
mod kind;
mod types;
mod validator;

pub use builder::{generate, generate_with, Generated, SchemaBuilder};
pub use errors::{SchemaError, SchemaResult};
pub use kind::ValueKind;
pub use types::{FieldDef, Schema, SchemaId, TypeDescriptor};
pub use validator::{accepts, validate};
