//! Schema-backed instances
//!
//! An [`Instance`] holds one slot per schema field. Slots start unset and
//! every write is validated against the field's descriptor before it is
//! stored, so a populated slot always satisfies its descriptor.
//!
//! Writing a raw mapping to a nested field replaces the nested instance
//! wholesale: a fresh instance of the nested schema is filled key by key and
//! only stored once every key has passed. Nothing is merged with the
//! previous nested value.
//!
//! Instances are plain values. Concurrent writers need their own locking.

use crate::observability::{log_event_with_fields, metrics, Event};
use crate::schema::{validate, Schema, SchemaError, SchemaResult, TypeDescriptor};
use crate::value::{Key, Mapping, Value};

/// A mutable value validated against one schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    schema: Schema,
    slots: Vec<Option<Value>>,
}

impl Instance {
    /// Creates an instance with every field unset
    fn empty(schema: Schema) -> Self {
        let slots = vec![None; schema.len()];
        Self { schema, slots }
    }

    /// Constructs an instance from initial values.
    ///
    /// Mappings supplied for nested fields are constructed recursively;
    /// every other value goes through [`Instance::set`]. Fields missing from
    /// `initial` stay unset.
    ///
    /// # Errors
    ///
    /// Returns the first `TypeMismatch` or `UnknownField` encountered,
    /// reported against the innermost field.
    pub fn construct(schema: &Schema, initial: Mapping) -> SchemaResult<Self> {
        let mut instance = Self::empty(schema.clone());

        for (key, value) in initial {
            let index = instance.index_of(&key)?;
            match (&schema.fields()[index].descriptor, value) {
                (TypeDescriptor::Nested(nested), Value::Map(map)) => {
                    let child = Self::construct(nested, map)?;
                    instance.slots[index] = Some(Value::Struct(child));
                }
                (_, value) => instance.set(key, value)?,
            }
        }

        let fields = instance.populated().to_string();
        log_event_with_fields(
            Event::InstanceConstructed,
            &[("schema", schema.display_name()), ("populated", fields.as_str())],
        );
        metrics().increment_instances_constructed();

        Ok(instance)
    }

    /// The schema backing this instance
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Reads a field.
    ///
    /// Returns `None` for fields that were never set and for names the
    /// schema does not declare.
    pub fn get(&self, field: impl Into<Key>) -> Option<&Value> {
        let key = field.into();
        self.schema
            .field_index(key.as_str())
            .and_then(|i| self.slots[i].as_ref())
    }

    /// Mutable access to a populated field, for in-place nested writes
    pub fn get_mut(&mut self, field: impl Into<Key>) -> Option<&mut Value> {
        let key = field.into();
        match self.schema.field_index(key.as_str()) {
            Some(i) => self.slots[i].as_mut(),
            None => None,
        }
    }

    /// Returns true if the field has been written
    pub fn is_set(&self, field: impl Into<Key>) -> bool {
        self.get(field).is_some()
    }

    /// Writes a field after validating it.
    ///
    /// # Errors
    ///
    /// - `UnknownField` if the schema has no such field
    /// - `TypeMismatch` if the value fails the field's descriptor; for a
    ///   raw mapping written to a nested field, the error names the nested
    ///   field that failed
    ///
    /// On error the field keeps its previous value.
    pub fn set(&mut self, field: impl Into<Key>, value: impl Into<Value>) -> SchemaResult<()> {
        let key = field.into();
        let index = self.index_of(&key)?;
        let schema = self.schema.clone();
        let def = &schema.fields()[index];

        let stored = match (&def.descriptor, value.into()) {
            (TypeDescriptor::Nested(nested), Value::Map(map)) => {
                let mut fresh = Self::empty(nested.clone());
                for (k, v) in map {
                    fresh.set(k, v)?;
                }
                Value::Struct(fresh)
            }
            (descriptor, value) => {
                if let Err(err) = validate(&def.name, descriptor, &value) {
                    let actual = value.kind().type_name();
                    log_event_with_fields(
                        Event::WriteRejected,
                        &[("field", def.name.as_str()), ("actual", actual.as_str())],
                    );
                    metrics().increment_writes_rejected();
                    return Err(err);
                }
                value
            }
        };

        self.slots[index] = Some(stored);
        metrics().increment_writes_accepted();
        Ok(())
    }

    /// Boolean predicate accessor; mirrors [`Instance::get`].
    ///
    /// # Errors
    ///
    /// - `UnknownField` if the schema has no such field
    /// - `NotAPredicate` if the field was not inferred from a boolean
    pub fn predicate(&self, field: impl Into<Key>) -> SchemaResult<Option<&Value>> {
        let key = field.into();
        let index = self.index_of(&key)?;
        if !self.schema.fields()[index].descriptor.is_boolean() {
            return Err(SchemaError::not_a_predicate(key.as_str()));
        }
        Ok(self.slots[index].as_ref())
    }

    /// Fields in schema order with their current values
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.schema
            .fields()
            .iter()
            .zip(self.slots.iter())
            .map(|(def, slot)| (def.name.as_str(), slot.as_ref()))
    }

    /// Number of populated fields
    pub fn populated(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    fn index_of(&self, key: &Key) -> SchemaResult<usize> {
        self.schema
            .field_index(key.as_str())
            .ok_or_else(|| SchemaError::unknown_field(key.as_str(), self.schema.display_name()))
    }
}

impl Schema {
    /// Constructs an instance of this schema from initial values
    pub fn construct(&self, initial: Mapping) -> SchemaResult<Instance> {
        Instance::construct(self, initial)
    }

    /// Creates an instance with every field unset
    pub fn instantiate(&self) -> Instance {
        Instance::empty(self.clone())
    }
}
