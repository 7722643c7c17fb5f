//! Bridge between [`Value`] and `serde_json::Value`

use serde_json::{Map, Number};

use super::{Key, Mapping, Value};

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                // u64 beyond i64::MAX and every non-integral number
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::Map(
                obj.into_iter()
                    .map(|(k, v)| (Key::Text(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Value {
    /// Renders this value as JSON.
    ///
    /// Symbols and opaque payloads become strings, instances become objects
    /// of their populated fields, and non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Nil => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::Number((*i).into()),
            Value::Float(f) => Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) | Value::Symbol(s) => serde_json::Value::String(s.clone()),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(mapping) => mapping_to_json(mapping),
            Value::Struct(instance) => {
                let mut obj = Map::new();
                for (name, value) in instance.fields() {
                    if let Some(value) = value {
                        obj.insert(name.to_string(), value.to_json());
                    }
                }
                serde_json::Value::Object(obj)
            }
            Value::Opaque(opaque) => serde_json::Value::String(opaque.payload().to_string()),
        }
    }
}

fn mapping_to_json(mapping: &Mapping) -> serde_json::Value {
    let mut obj = Map::new();
    for (key, value) in mapping.iter() {
        obj.insert(key.as_str().to_string(), value.to_json());
    }
    serde_json::Value::Object(obj)
}
