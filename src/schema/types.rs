//! Schema type definitions
//!
//! A [`Schema`] is an ordered list of fields, each with a
//! [`TypeDescriptor`], plus a registry of the nested schemas derived from
//! non-empty nested samples. Schemas are immutable once built and are shared
//! by handle between every instance constructed from them.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use super::kind::ValueKind;

/// Validation rule for a single field
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// Value must be of this kind or a subtype of it
    Exact(ValueKind),
    /// Value must satisfy at least one member; only built for booleans
    OneOf(Vec<ValueKind>),
    /// Value must be an instance of this schema, or a mapping that is
    /// validated into a fresh one
    Nested(Schema),
    /// Value must be any mapping; built from an empty sample mapping
    GenericContainer,
}

impl TypeDescriptor {
    /// The boolean union
    pub fn boolean() -> Self {
        TypeDescriptor::OneOf(vec![ValueKind::True, ValueKind::False])
    }

    /// Returns true for the boolean union
    pub fn is_boolean(&self) -> bool {
        match self {
            TypeDescriptor::OneOf(kinds) => {
                kinds.len() == 2
                    && kinds.contains(&ValueKind::True)
                    && kinds.contains(&ValueKind::False)
            }
            _ => false,
        }
    }

    /// Acceptable type names, for error messages
    pub fn expected_names(&self) -> Vec<String> {
        match self {
            TypeDescriptor::Exact(kind) => vec![kind.type_name()],
            TypeDescriptor::OneOf(kinds) => kinds.iter().map(ValueKind::type_name).collect(),
            TypeDescriptor::Nested(schema) => vec![schema.display_name().to_string()],
            TypeDescriptor::GenericContainer => vec![ValueKind::Map.type_name()],
        }
    }

    /// Describes the descriptor as JSON
    pub fn describe(&self) -> serde_json::Value {
        match self {
            TypeDescriptor::Exact(kind) => json!({ "exact": kind.type_name() }),
            TypeDescriptor::OneOf(kinds) => json!({
                "one_of": kinds.iter().map(ValueKind::type_name).collect::<Vec<_>>()
            }),
            TypeDescriptor::Nested(schema) => json!({ "nested": schema.describe() }),
            TypeDescriptor::GenericContainer => json!("map"),
        }
    }
}

/// Unique schema identity.
///
/// Two schemas built from identical samples still get different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaId(Uuid);

impl SchemaId {
    fn generate() -> Self {
        SchemaId(Uuid::new_v4())
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named field and its descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub descriptor: TypeDescriptor,
}

#[derive(Debug)]
struct SchemaNode {
    id: SchemaId,
    name: Option<String>,
    fields: Vec<FieldDef>,
    index: HashMap<String, usize>,
    nested: HashMap<String, Schema>,
}

/// Shared handle to an immutable schema.
///
/// Cloning is cheap. Equality is identity: two handles are equal only if
/// they refer to the same built schema.
#[derive(Debug, Clone)]
pub struct Schema {
    node: Arc<SchemaNode>,
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.node.id == other.node.id
    }
}

impl Schema {
    /// Assembles a schema from ordered fields and its nested registry.
    ///
    /// A later field with the same name replaces the earlier one in place.
    pub(crate) fn assemble(
        name: Option<String>,
        fields: Vec<FieldDef>,
        nested: HashMap<String, Schema>,
    ) -> Self {
        let mut ordered: Vec<FieldDef> = Vec::with_capacity(fields.len());
        let mut index = HashMap::with_capacity(fields.len());
        for field in fields {
            match index.get(&field.name) {
                Some(&i) => ordered[i] = field,
                None => {
                    index.insert(field.name.clone(), ordered.len());
                    ordered.push(field);
                }
            }
        }

        Self {
            node: Arc::new(SchemaNode {
                id: SchemaId::generate(),
                name,
                fields: ordered,
                index,
                nested,
            }),
        }
    }

    pub fn id(&self) -> SchemaId {
        self.node.id
    }

    /// Registered name, if any
    pub fn name(&self) -> Option<&str> {
        self.node.name.as_deref()
    }

    /// Name used in messages; unnamed schemas display as `Struct`
    pub fn display_name(&self) -> &str {
        self.node.name.as_deref().unwrap_or("Struct")
    }

    /// Fields in sample order
    pub fn fields(&self) -> &[FieldDef] {
        &self.node.fields
    }

    /// Field names in sample order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.node.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.node.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node.fields.is_empty()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.node.index.contains_key(name)
    }

    /// Position of a field in sample order
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.node.index.get(name).copied()
    }

    /// Descriptor of a field
    pub fn descriptor(&self, name: &str) -> Option<&TypeDescriptor> {
        self.field_index(name).map(|i| &self.node.fields[i].descriptor)
    }

    /// Looks up a nested schema by its registered (capitalized) name
    pub fn nested(&self, name: &str) -> Option<&Schema> {
        self.node.nested.get(name)
    }

    /// Registered nested schema names, sorted
    pub fn nested_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.node.nested.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Describes the schema as JSON, recursing into nested schemas
    pub fn describe(&self) -> serde_json::Value {
        let fields: Vec<serde_json::Value> = self
            .node
            .fields
            .iter()
            .map(|f| json!({ "name": f.name, "type": f.descriptor.describe() }))
            .collect();

        json!({
            "name": self.node.name,
            "fields": fields,
            "nested": self.nested_names(),
        })
    }
}
