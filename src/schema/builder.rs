//! Schema inference from a single sample mapping
//!
//! Inference rules, applied to each sample entry in order:
//! - empty mapping     -> GenericContainer
//! - non-empty mapping -> Nested (built recursively, registered under the
//!                        capitalized field name)
//! - `true` / `false`  -> OneOf(True, False)
//! - anything else     -> Exact(runtime kind), including Nil
//!
//! The sample is trusted completely. Building never fails.

use std::collections::HashMap;

use super::types::{FieldDef, Schema, TypeDescriptor};
use crate::observability::{log_event_with_fields, metrics, Event};
use crate::value::{Mapping, Value};

/// Derives schemas from sample data.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    name: Option<String>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names the top-level schema
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builds a schema from a sample mapping
    pub fn build(&self, sample: &Mapping) -> Schema {
        let schema = build_node(self.name.clone(), sample);

        let fields = schema.len().to_string();
        log_event_with_fields(
            Event::SchemaGenerated,
            &[("schema", schema.display_name()), ("fields", fields.as_str())],
        );
        metrics().increment_schemas_generated();

        schema
    }
}

fn build_node(name: Option<String>, sample: &Mapping) -> Schema {
    let mut fields = Vec::with_capacity(sample.len());
    let mut nested = HashMap::new();

    for (key, value) in sample.iter() {
        let descriptor = match value {
            Value::Map(inner) if inner.is_empty() => TypeDescriptor::GenericContainer,
            Value::Map(inner) => {
                let registered = capitalize(key.as_str());
                let child = build_node(Some(registered.clone()), inner);
                log_event_with_fields(
                    Event::NestedSchemaRegistered,
                    &[("field", key.as_str()), ("name", registered.as_str())],
                );
                nested.insert(registered, child.clone());
                TypeDescriptor::Nested(child)
            }
            Value::Bool(_) => TypeDescriptor::boolean(),
            other => TypeDescriptor::Exact(other.kind()),
        };

        fields.push(FieldDef {
            name: key.as_str().to_string(),
            descriptor,
        });
    }

    Schema::assemble(name, fields, nested)
}

/// Upper-cases the first character and lower-cases the rest
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Outcome of [`generate`]
#[derive(Debug, Clone, PartialEq)]
pub enum Generated {
    /// The sample was a mapping
    Schema(Schema),
    /// The sample was not a mapping and is returned unchanged
    PassThrough(Value),
}

impl Generated {
    pub fn is_schema(&self) -> bool {
        matches!(self, Generated::Schema(_))
    }

    pub fn into_schema(self) -> Option<Schema> {
        match self {
            Generated::Schema(schema) => Some(schema),
            Generated::PassThrough(_) => None,
        }
    }

    pub fn into_passthrough(self) -> Option<Value> {
        match self {
            Generated::Schema(_) => None,
            Generated::PassThrough(value) => Some(value),
        }
    }
}

/// Derives a schema from `sample`, or passes a non-mapping sample through.
pub fn generate(sample: Value) -> Generated {
    generate_with(&SchemaBuilder::new(), sample)
}

/// [`generate`] with a configured builder
pub fn generate_with(builder: &SchemaBuilder, sample: Value) -> Generated {
    match sample {
        Value::Map(mapping) => Generated::Schema(builder.build(&mapping)),
        other => {
            let kind = other.kind().type_name();
            log_event_with_fields(Event::SamplePassedThrough, &[("kind", kind.as_str())]);
            metrics().increment_passthroughs();
            Generated::PassThrough(other)
        }
    }
}

impl Schema {
    /// Builds an unnamed schema from a sample mapping
    pub fn from_sample(sample: &Mapping) -> Schema {
        SchemaBuilder::new().build(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ValueKind;
    use crate::value::{Key, OpaqueType, OpaqueValue};
    use serde_json::json;

    fn sample(json: serde_json::Value) -> Mapping {
        match Value::from(json) {
            Value::Map(m) => m,
            other => panic!("expected mapping, got {:?}", other),
        }
    }

    #[test]
    fn test_scalar_inference() {
        let schema = Schema::from_sample(&sample(json!({
            "name": "Dave",
            "age": 40,
            "score": 9.5,
            "tags": ["a", "b"]
        })));

        assert_eq!(schema.descriptor("name"), Some(&TypeDescriptor::Exact(ValueKind::Text)));
        assert_eq!(schema.descriptor("age"), Some(&TypeDescriptor::Exact(ValueKind::Integer)));
        assert_eq!(schema.descriptor("score"), Some(&TypeDescriptor::Exact(ValueKind::Float)));
        assert_eq!(schema.descriptor("tags"), Some(&TypeDescriptor::Exact(ValueKind::Sequence)));
    }

    #[test]
    fn test_boolean_inference_is_union() {
        let schema = Schema::from_sample(&sample(json!({ "on": true, "off": false })));
        assert!(schema.descriptor("on").unwrap().is_boolean());
        assert!(schema.descriptor("off").unwrap().is_boolean());
    }

    #[test]
    fn test_nil_inference_is_strict() {
        let schema = Schema::from_sample(&sample(json!({ "nothing": null })));
        assert_eq!(schema.descriptor("nothing"), Some(&TypeDescriptor::Exact(ValueKind::Nil)));
    }

    #[test]
    fn test_empty_mapping_is_generic_container() {
        let schema = Schema::from_sample(&sample(json!({ "config": {} })));
        assert_eq!(schema.descriptor("config"), Some(&TypeDescriptor::GenericContainer));
        assert!(schema.nested("Config").is_none());
    }

    #[test]
    fn test_nested_mapping_builds_and_registers_schema() {
        let schema = Schema::from_sample(&sample(json!({
            "location": { "city": "Sheffield", "geo": { "lat": 53.38 } }
        })));

        let location = schema.nested("Location").expect("Location registered");
        assert_eq!(schema.descriptor("location"), Some(&TypeDescriptor::Nested(location.clone())));
        assert_eq!(location.name(), Some("Location"));
        assert_eq!(location.descriptor("city"), Some(&TypeDescriptor::Exact(ValueKind::Text)));

        let geo = location.nested("Geo").expect("Geo registered on Location");
        assert_eq!(geo.descriptor("lat"), Some(&TypeDescriptor::Exact(ValueKind::Float)));
        assert!(schema.nested("Geo").is_none());
    }

    #[test]
    fn test_colliding_nested_names_keep_last_registration() {
        let schema = Schema::from_sample(&sample(json!({
            "location": { "city": "Sheffield" },
            "LOCATION": { "code": 114 }
        })));

        let nested_of = |field: &str| match schema.descriptor(field) {
            Some(TypeDescriptor::Nested(nested)) => nested.clone(),
            other => panic!("expected nested descriptor, got {:?}", other),
        };
        let first = nested_of("location");
        let second = nested_of("LOCATION");
        assert_ne!(first, second);

        // Both fields keep their own nested schema; the registry holds the later one
        assert_eq!(schema.nested_names(), vec!["Location"]);
        assert_eq!(schema.nested("Location"), Some(&second));
        assert!(first.has_field("city"));
        assert!(second.has_field("code"));
    }

    #[test]
    fn test_symbol_and_text_keys_name_same_field() {
        let mut m = Mapping::new();
        m.insert(Key::symbol("name"), "Dave");
        m.insert("age", 40);

        let schema = Schema::from_sample(&m);
        assert!(schema.has_field("name"));
        assert!(schema.has_field("age"));
    }

    #[test]
    fn test_opaque_and_struct_samples_are_exact() {
        let money = OpaqueType::new("Money");
        let owner_schema = Schema::from_sample(&sample(json!({ "name": "Dave" })));
        let owner = owner_schema.instantiate();

        let mut m = Mapping::new();
        m.insert("price", OpaqueValue::new(&money, "9.99"));
        m.insert("owner", owner);

        let schema = Schema::from_sample(&m);
        assert_eq!(
            schema.descriptor("price"),
            Some(&TypeDescriptor::Exact(ValueKind::Opaque(money)))
        );
        assert_eq!(
            schema.descriptor("owner"),
            Some(&TypeDescriptor::Exact(ValueKind::Struct(owner_schema)))
        );
    }

    #[test]
    fn test_generate_passes_non_mapping_through() {
        let generated = generate(Value::from("not a hash"));
        assert!(!generated.is_schema());
        assert_eq!(generated.into_passthrough(), Some(Value::from("not a hash")));

        assert_eq!(generate(Value::Nil), Generated::PassThrough(Value::Nil));
    }

    #[test]
    fn test_generate_empty_mapping_gives_fieldless_schema() {
        let schema = generate(Value::Map(Mapping::new())).into_schema().unwrap();
        assert!(schema.is_empty());
    }

    #[test]
    fn test_named_builder() {
        let schema = SchemaBuilder::new()
            .named("Person")
            .build(&sample(json!({ "name": "Dave" })));
        assert_eq!(schema.display_name(), "Person");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("location"), "Location");
        assert_eq!(capitalize("homeAddress"), "Homeaddress");
        assert_eq!(capitalize("home_address"), "Home_address");
        assert_eq!(capitalize("état"), "État");
        assert_eq!(capitalize(""), "");
    }
}
