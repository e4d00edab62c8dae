//! Substitution rewriting: replace planned values with their symbols.

use hydrate_core::{Result, Value};
use serde_json::Value as Json;

use crate::planner::SubstitutionPlan;
use crate::substitute::{substitute, Dictionary};

impl Dictionary<Value> for SubstitutionPlan<'_> {
    fn value(&self, node: &Value) -> Option<Json> {
        self.symbol_for(node).map(|s| Json::String(s.to_string()))
    }

    fn key(&self, key: &str) -> Option<String> {
        self.symbol_for_key(key).map(str::to_string)
    }
}

/// Rewrite one payload value. Values without a symbol are copied as-is.
pub fn rewrite(value: &Value, plan: &SubstitutionPlan<'_>) -> Result<Json> {
    substitute(value, plan)
}
