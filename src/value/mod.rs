//! Runtime value model for shapegen
//!
//! Samples, construction data and field values are all expressed as [`Value`].
//! Keyed data uses [`Mapping`], which keeps insertion order so that schema
//! fields are derived in the order the sample presents them.

mod json;

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::instance::Instance;
use crate::schema::ValueKind;

/// A field key.
///
/// Textual and symbolic keys name the same field once they reach a schema,
/// but a raw mapping keeps them apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Textual key, e.g. `"name"`
    Text(String),
    /// Symbolic key, e.g. `:name`
    Symbol(String),
}

impl Key {
    /// Creates a symbolic key
    pub fn symbol(name: impl Into<String>) -> Self {
        Key::Symbol(name.into())
    }

    /// Returns the field name this key resolves to
    pub fn as_str(&self) -> &str {
        match self {
            Key::Text(s) | Key::Symbol(s) => s,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Text(s)
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

/// Insertion-ordered key/value collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(Key, Value)>,
}

impl Mapping {
    /// Creates an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing an existing entry with an equal key in place.
    ///
    /// Returns the previous value if the key was already present.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Looks up a value by key
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        let key = key.into();
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the mapping has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterates keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl IntoIterator for Mapping {
    type Item = (Key, Value);
    type IntoIter = std::vec::IntoIter<(Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

/// A named type from outside the closed set of primitive kinds.
///
/// Types form a single-inheritance chain through `parent`; a value of a
/// subtype satisfies a field typed with any of its ancestors. Each type has
/// its own identity: two types created with the same name are unrelated.
#[derive(Debug, Clone)]
pub struct OpaqueType {
    id: Uuid,
    name: String,
    parent: Option<Arc<OpaqueType>>,
}

impl PartialEq for OpaqueType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for OpaqueType {}

impl OpaqueType {
    /// Creates a root type
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            parent: None,
        })
    }

    /// Creates a type deriving from `parent`
    pub fn subtype(parent: &Arc<OpaqueType>, name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            parent: Some(Arc::clone(parent)),
        })
    }

    /// Type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent type, if any
    pub fn parent(&self) -> Option<&Arc<OpaqueType>> {
        self.parent.as_ref()
    }

    /// Returns true if this type is `other` or descends from it
    pub fn is_subtype_of(&self, other: &OpaqueType) -> bool {
        let mut current = Some(self);
        while let Some(ty) = current {
            if ty.id == other.id {
                return true;
            }
            current = ty.parent.as_deref();
        }
        false
    }
}

/// A value of an [`OpaqueType`] with a textual payload.
#[derive(Debug, Clone, PartialEq)]
pub struct OpaqueValue {
    ty: Arc<OpaqueType>,
    payload: String,
}

impl OpaqueValue {
    pub fn new(ty: &Arc<OpaqueType>, payload: impl Into<String>) -> Self {
        Self {
            ty: Arc::clone(ty),
            payload: payload.into(),
        }
    }

    pub fn opaque_type(&self) -> &Arc<OpaqueType> {
        &self.ty
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }
}

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absent-value sentinel
    Nil,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Symbol(String),
    /// Ordered sequence; element types are never checked
    Sequence(Vec<Value>),
    /// Raw keyed data
    Map(Mapping),
    /// A schema-backed instance
    Struct(Instance),
    Opaque(OpaqueValue),
}

impl Value {
    /// Returns the runtime type tag of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Nil => ValueKind::Nil,
            Value::Bool(true) => ValueKind::True,
            Value::Bool(false) => ValueKind::False,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
            Value::Symbol(_) => ValueKind::Symbol,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Map(_) => ValueKind::Map,
            Value::Struct(instance) => ValueKind::Struct(instance.schema().clone()),
            Value::Opaque(opaque) => ValueKind::Opaque(Arc::clone(opaque.opaque_type())),
        }
    }

    /// Creates a symbol value
    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the text of a `Text` or `Symbol` value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Struct(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_instance_mut(&mut self) -> Option<&mut Instance> {
        match self {
            Value::Struct(i) => Some(i),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Map(m)
    }
}

impl From<Instance> for Value {
    fn from(i: Instance) -> Self {
        Value::Struct(i)
    }
}

impl From<OpaqueValue> for Value {
    fn from(o: OpaqueValue) -> Self {
        Value::Opaque(o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_preserves_insertion_order() {
        let mut m = Mapping::new();
        m.insert("zebra", 1);
        m.insert("apple", 2);
        m.insert("mango", 3);

        let keys: Vec<&str> = m.keys().map(Key::as_str).collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_mapping_insert_replaces_in_place() {
        let mut m = Mapping::new();
        m.insert("a", 1);
        m.insert("b", 2);
        let old = m.insert("a", 10);

        assert_eq!(old, Some(Value::Integer(1)));
        assert_eq!(m.len(), 2);
        assert_eq!(m.get("a"), Some(&Value::Integer(10)));
        assert_eq!(m.keys().next().map(Key::as_str), Some("a"));
    }

    #[test]
    fn test_mapping_keeps_text_and_symbol_keys_apart() {
        let mut m = Mapping::new();
        m.insert("name", "text");
        m.insert(Key::symbol("name"), "symbol");

        assert_eq!(m.len(), 2);
        assert_eq!(m.get("name"), Some(&Value::from("text")));
        assert_eq!(m.get(Key::symbol("name")), Some(&Value::from("symbol")));
    }

    #[test]
    fn test_key_resolves_to_same_name() {
        assert_eq!(Key::from("name").as_str(), Key::symbol("name").as_str());
    }

    #[test]
    fn test_value_kinds() {
        assert_eq!(Value::Nil.kind(), ValueKind::Nil);
        assert_eq!(Value::from(true).kind(), ValueKind::True);
        assert_eq!(Value::from(false).kind(), ValueKind::False);
        assert_eq!(Value::from(40).kind(), ValueKind::Integer);
        assert_eq!(Value::from(1.5).kind(), ValueKind::Float);
        assert_eq!(Value::from("Dave").kind(), ValueKind::Text);
        assert_eq!(Value::symbol("dave").kind(), ValueKind::Symbol);
        assert_eq!(Value::from(vec![Value::from(1)]).kind(), ValueKind::Sequence);
        assert_eq!(Value::from(Mapping::new()).kind(), ValueKind::Map);
    }

    #[test]
    fn test_opaque_subtype_chain() {
        let animal = OpaqueType::new("Animal");
        let dog = OpaqueType::subtype(&animal, "Dog");
        let puppy = OpaqueType::subtype(&dog, "Puppy");

        assert!(puppy.is_subtype_of(&animal));
        assert!(puppy.is_subtype_of(&dog));
        assert!(dog.is_subtype_of(&dog));
        assert!(!animal.is_subtype_of(&dog));
        assert_eq!(puppy.parent().map(|p| p.name()), Some("Dog"));
    }

    #[test]
    fn test_opaque_types_with_same_name_are_unrelated() {
        let money = OpaqueType::new("Money");
        let game = OpaqueType::new("Game");
        let tokens = OpaqueType::subtype(&game, "Money");

        assert!(!tokens.is_subtype_of(&money));
        assert!(!OpaqueType::new("Money").is_subtype_of(&money));
        assert_ne!(*OpaqueType::new("Money"), *money);
        assert_eq!(*money, *Arc::clone(&money));
    }

    #[test]
    fn test_mapping_from_iterator() {
        let m: Mapping = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(m.len(), 2);
        assert_eq!(m.get("b"), Some(&Value::Integer(2)));
    }
}
