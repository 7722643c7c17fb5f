//! shapegen - derive a validated struct schema from one sample
//!
//! A sample mapping is turned into a [`Schema`](schema::Schema): field names
//! with inferred type descriptors, recursing into nested mappings. Instances
//! built from the schema validate every write against it.
//!
//! ```
//! use shapegen::schema::generate;
//! use shapegen::value::Value;
//! use serde_json::json;
//!
//! let schema = generate(Value::from(json!({ "name": "Dave", "age": 40 })))
//!     .into_schema()
//!     .unwrap();
//!
//! let mut person = schema.instantiate();
//! person.set("age", 41).unwrap();
//! assert!(person.set("age", "forty").is_err());
//! assert_eq!(person.get("name"), None);
//! ```

pub mod cli;
pub mod instance;
pub mod observability;
pub mod schema;
pub mod value;

pub use instance::Instance;
pub use schema::{generate, Generated, Schema, SchemaError, SchemaResult, TypeDescriptor, ValueKind};
pub use value::{Key, Mapping, OpaqueType, OpaqueValue, Value};
