//! Substitution planning: rank repeated values and give each a symbol.

use std::collections::HashMap;

use hydrate_core::{Result, Value};
use serde_json::{json, Value as Json};

use crate::symbols;
use crate::walker::{NodeKey, OccurrenceTable};

/// Value → symbol, for every value seen more than once.
#[derive(Debug, Default)]
pub struct SubstitutionPlan<'a> {
    symbols: HashMap<NodeKey<'a>, String>,
}

impl<'a> SubstitutionPlan<'a> {
    pub fn symbol_for<'b>(&'b self, value: &'b Value) -> Option<&'b str> {
        NodeKey::of(value)
            .and_then(|key| self.symbols.get(&key))
            .map(String::as_str)
    }

    pub fn symbol_for_key<'b>(&'b self, key: &'b str) -> Option<&'b str> {
        self.symbols.get(&NodeKey::String(key)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Symbol → original value, in rank order. The decoder's dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    entries: Vec<(String, Json)>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn get(&self, symbol: &str) -> Option<&Json> {
        self.index.get(symbol).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    pub fn entries(&self) -> &[(String, Json)] {
        &self.entries
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(s, _)| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `[[symbol, value], ...]`, the literal the decoder loads into a `Map`.
    pub fn to_json(&self) -> Json {
        Json::Array(self.entries.iter().map(|(s, v)| json!([s, v])).collect())
    }

    fn insert(&mut self, symbol: String, value: Json) {
        self.index.insert(symbol.clone(), self.entries.len());
        self.entries.push((symbol, value));
    }
}

/// Build the plan and its inverse table from a finished occurrence count.
///
/// Entries seen more than once are ranked by count, highest first; equal
/// counts keep first-seen order.
pub fn plan<'a>(
    occurrences: &OccurrenceTable<'a>,
    alphabet: &[char],
) -> Result<(SubstitutionPlan<'a>, SymbolTable)> {
    symbols::validate_alphabet(alphabet)?;

    let mut ranked: Vec<_> = occurrences.entries().iter().filter(|o| o.count > 1).collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));

    let mut plan = SubstitutionPlan::default();
    let mut table = SymbolTable::default();

    for (rank, occurrence) in ranked.into_iter().enumerate() {
        let name = symbols::allocate(rank, alphabet, |candidate| {
            occurrences.contains_string(candidate) || table.contains(candidate)
        });
        let Some(key) = occurrence.node.key() else { continue };
        table.insert(name.clone(), occurrence.node.to_json()?);
        plan.symbols.insert(key, name);
    }

    tracing::debug!(candidates = occurrences.len(), symbols = table.len(), "substitution plan built");
    Ok((plan, table))
}
