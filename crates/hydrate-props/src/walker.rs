//! Occurrence counting over payload value graphs.

use std::collections::HashMap;

use hydrate_core::{HydrateError, PropertyKey, Prototype, Result, Value};
use serde_json::{Number, Value as Json};

/// Counting key: content for primitives, `Arc` address for composites.
///
/// Numbers compare by their JSON representation, so `1` and `1.0` are
/// separate entries and each decodes to exactly what was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKey<'a> {
    Null,
    Bool(bool),
    Number(&'a Number),
    String(&'a str),
    Composite(usize),
}

impl<'a> NodeKey<'a> {
    /// `None` for values that are never counted (callables).
    pub fn of(value: &'a Value) -> Option<Self> {
        Some(match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Composite(std::sync::Arc::as_ptr(items) as *const () as usize),
            Value::Object(obj) => Self::Composite(std::sync::Arc::as_ptr(obj) as *const () as usize),
            Value::Function(_) => return None,
        })
    }
}

/// A counted thing: a value somewhere in a payload, or an object key.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Value(&'a Value),
    Key(&'a str),
}

impl<'a> Node<'a> {
    pub fn key(&self) -> Option<NodeKey<'a>> {
        match *self {
            Node::Value(v) => NodeKey::of(v),
            Node::Key(k) => Some(NodeKey::String(k)),
        }
    }

    pub fn to_json(&self) -> Result<Json> {
        match self {
            Node::Value(v) => v.to_json(),
            Node::Key(k) => Ok(Json::String(k.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Occurrence<'a> {
    pub node: Node<'a>,
    pub count: usize,
}

/// Occurrence counts in first-seen order.
#[derive(Debug, Default)]
pub struct OccurrenceTable<'a> {
    entries: Vec<Occurrence<'a>>,
    index: HashMap<NodeKey<'a>, usize>,
}

impl<'a> OccurrenceTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Occurrence<'a>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, value: &Value) -> usize {
        NodeKey::of(value)
            .and_then(|key| self.index.get(&key))
            .map(|&i| self.entries[i].count)
            .unwrap_or(0)
    }

    /// Whether `s` was seen anywhere, as a string value or an object key.
    pub fn contains_string(&self, s: &str) -> bool {
        self.index.contains_key(&NodeKey::String(s))
    }

    /// Returns true on first sight.
    fn bump(&mut self, key: NodeKey<'a>, node: Node<'a>) -> bool {
        if let Some(&i) = self.index.get(&key) {
            self.entries[i].count += 1;
            return false;
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(Occurrence { node, count: 1 });
        true
    }

    /// Count `value` and, on first sight of a composite, everything inside it.
    pub fn walk(&mut self, value: &'a Value) -> Result<()> {
        if let Value::Function(name) = value {
            return Err(HydrateError::UnsupportedCallable { name: name.clone() });
        }
        let Some(key) = NodeKey::of(value) else {
            return Ok(());
        };

        match value {
            Value::Array(items) => {
                if self.bump(key, Node::Value(value)) {
                    for item in items.iter() {
                        self.walk(item)?;
                    }
                }
            }
            Value::Object(obj) => {
                if self.index.contains_key(&key) {
                    self.bump(key, Node::Value(value));
                    return Ok(());
                }
                if let Prototype::Class(class) = &obj.prototype {
                    return Err(HydrateError::UnsupportedInstance { class: class.clone() });
                }
                if let Some(desc) = obj.properties.iter().find_map(|(k, _)| match k {
                    PropertyKey::Symbol(desc) => Some(desc),
                    PropertyKey::String(_) => None,
                }) {
                    return Err(HydrateError::UnsupportedKeyType { key: format!("Symbol({desc})") });
                }
                self.bump(key, Node::Value(value));
                for (k, v) in &obj.properties {
                    self.walk(v)?;
                    if let PropertyKey::String(k) = k {
                        self.bump(NodeKey::String(k), Node::Key(k));
                    }
                }
            }
            _ => {
                self.bump(key, Node::Value(value));
            }
        }
        Ok(())
    }
}

/// Count every sub-value of every payload value in one table.
pub fn count_occurrences<'a, I>(values: I) -> Result<OccurrenceTable<'a>>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut table = OccurrenceTable::new();
    for value in values {
        table.walk(value)?;
    }
    Ok(table)
}
