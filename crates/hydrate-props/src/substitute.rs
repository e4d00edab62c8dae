//! The one recursive walk that both encodes and decodes payloads.
//!
//! Encoding folds a [`Value`] through a [`SubstitutionPlan`]; decoding folds
//! the rewritten JSON through a [`SymbolTable`]. Both go through
//! [`substitute`], so the two directions cannot drift apart. The browser-side
//! decoder emitted by `decoder::decoder_script` performs the same steps and must be
//! edited together with this function.
//!
//! [`SubstitutionPlan`]: crate::planner::SubstitutionPlan
//! [`SymbolTable`]: crate::planner::SymbolTable

use hydrate_core::{HydrateError, PropertyKey, Prototype, Result, Value};
use serde_json::{Map, Value as Json};

/// How the walk sees a node.
pub enum Shape<'n, N> {
    Sequence(&'n [N]),
    Mapping(Vec<(&'n str, &'n N)>),
    Leaf,
}

pub trait Tree: Sized {
    fn shape(&self) -> Result<Shape<'_, Self>>;

    /// JSON form of a leaf.
    fn leaf(&self) -> Result<Json>;
}

/// Replacement lookups for whole nodes and for mapping keys.
pub trait Dictionary<N> {
    fn value(&self, node: &N) -> Option<Json>;
    fn key(&self, key: &str) -> Option<String>;
}

/// A node in the dictionary is replaced wholesale and never descended into.
/// Otherwise sequences map element-wise, mappings re-key through the
/// dictionary (keeping unknown keys) and recurse into values, and leaves
/// pass through.
pub fn substitute<N, D>(node: &N, dict: &D) -> Result<Json>
where
    N: Tree,
    D: Dictionary<N>,
{
    if let Some(hit) = dict.value(node) {
        return Ok(hit);
    }
    Ok(match node.shape()? {
        Shape::Sequence(items) => Json::Array(
            items.iter().map(|item| substitute(item, dict)).collect::<Result<_>>()?,
        ),
        Shape::Mapping(entries) => {
            let mut out = Map::new();
            for (k, v) in entries {
                let key = dict.key(k).unwrap_or_else(|| k.to_string());
                out.insert(key, substitute(v, dict)?);
            }
            Json::Object(out)
        }
        Shape::Leaf => node.leaf()?,
    })
}

impl Tree for Value {
    fn shape(&self) -> Result<Shape<'_, Self>> {
        Ok(match self {
            Value::Array(items) => Shape::Sequence(items.as_slice()),
            Value::Object(obj) => {
                if let Prototype::Class(class) = &obj.prototype {
                    return Err(HydrateError::UnsupportedInstance { class: class.clone() });
                }
                let mut entries = Vec::with_capacity(obj.len());
                for (k, v) in &obj.properties {
                    match k {
                        PropertyKey::String(k) => entries.push((k.as_str(), v)),
                        PropertyKey::Symbol(desc) => {
                            return Err(HydrateError::UnsupportedKeyType { key: format!("Symbol({desc})") })
                        }
                    }
                }
                Shape::Mapping(entries)
            }
            _ => Shape::Leaf,
        })
    }

    fn leaf(&self) -> Result<Json> {
        self.to_json()
    }
}

impl Tree for Json {
    fn shape(&self) -> Result<Shape<'_, Self>> {
        Ok(match self {
            Json::Array(items) => Shape::Sequence(items.as_slice()),
            Json::Object(map) => Shape::Mapping(map.iter().map(|(k, v)| (k.as_str(), v)).collect()),
            _ => Shape::Leaf,
        })
    }

    fn leaf(&self) -> Result<Json> {
        Ok(self.clone())
    }
}
