//! Payload value model.
//!
//! Primitives compare by content. Arrays and objects live behind an `Arc` and
//! are told apart by pointer: cloning a `Value::Array` shares the same
//! composite, while parsing the same JSON twice yields two distinct ones.

use std::sync::Arc;

use serde_json::{Map, Number, Value as Json};

use crate::error::{HydrateError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Arc<Vec<Value>>),
    Object(Arc<Object>),
    /// A callable host value. Never serializable.
    Function(String),
}

/// Where an object's behaviour comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prototype {
    /// A literal record.
    Plain,
    /// A record without any prototype.
    Null,
    /// An instance of a named class.
    Class(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    String(String),
    /// A symbol key, identified by its description.
    Symbol(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub prototype: Prototype,
    pub properties: Vec<(PropertyKey, Value)>,
}

impl Object {
    pub fn new() -> Self {
        Self { prototype: Prototype::Plain, properties: Vec::new() }
    }

    pub fn with_prototype(prototype: Prototype) -> Self {
        Self { prototype, properties: Vec::new() }
    }

    pub fn instance(class: impl Into<String>) -> Self {
        Self::with_prototype(Prototype::Class(class.into()))
    }

    /// Set a string-keyed property, replacing an existing one in place.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.insert_key(PropertyKey::String(key.into()), value);
    }

    pub fn insert_symbol(&mut self, description: impl Into<String>, value: Value) {
        self.insert_key(PropertyKey::Symbol(description.into()), value);
    }

    fn insert_key(&mut self, key: PropertyKey, value: Value) {
        match self.properties.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.properties.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value.into());
        self
    }

    pub fn with_symbol(mut self, description: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert_symbol(description, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.iter().find_map(|(k, v)| match k {
            PropertyKey::String(s) if s == key => Some(v),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// True for literal records and null-prototype records.
    pub fn is_plain(&self) -> bool {
        matches!(self.prototype, Prototype::Plain | Prototype::Null)
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    pub fn function(name: impl Into<String>) -> Self {
        Self::Function(name.into())
    }

    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::Array(Arc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Build a plain object from string-keyed pairs.
    pub fn object<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut obj = Object::new();
        for (k, v) in pairs {
            obj.insert(k, v.into());
        }
        Self::Object(Arc::new(obj))
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object(_))
    }

    /// Identity comparison: pointer equality for composites, content
    /// equality for everything else.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Array(a), Self::Array(b)) => Arc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            (a, b) if !a.is_composite() && !b.is_composite() => a == b,
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert to plain JSON, rejecting anything JSON cannot carry.
    pub fn to_json(&self) -> Result<Json> {
        Ok(match self {
            Self::Null => Json::Null,
            Self::Bool(b) => Json::Bool(*b),
            Self::Number(n) => Json::Number(n.clone()),
            Self::String(s) => Json::String(s.clone()),
            Self::Array(items) => Json::Array(items.iter().map(Value::to_json).collect::<Result<_>>()?),
            Self::Object(obj) => {
                if let Prototype::Class(class) = &obj.prototype {
                    return Err(HydrateError::UnsupportedInstance { class: class.clone() });
                }
                let mut map = Map::new();
                for (key, value) in &obj.properties {
                    match key {
                        PropertyKey::String(k) => {
                            map.insert(k.clone(), value.to_json()?);
                        }
                        PropertyKey::Symbol(desc) => {
                            return Err(HydrateError::UnsupportedKeyType { key: format!("Symbol({desc})") });
                        }
                    }
                }
                Json::Object(map)
            }
            Self::Function(name) => return Err(HydrateError::UnsupportedCallable { name: name.clone() }),
        })
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => Self::Number(n),
            Json::String(s) => Self::String(s),
            Json::Array(items) => Self::array(items),
            Json::Object(map) => Self::object(map),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<f64> for Value {
    /// Non-finite numbers have no JSON form and become null.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map(Self::Number).unwrap_or(Self::Null)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Self::Object(Arc::new(obj))
    }
}
