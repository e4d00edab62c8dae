//! Priority-tagged script stacks a page collects fragments into.

use serde::{Deserialize, Serialize};

/// One entry on a page's script stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptFragment {
    /// What produced the fragment (a payload name, or `compressProps`).
    pub source: String,
    pub string: String,
    pub priority: i32,
}

impl ScriptFragment {
    pub fn new(source: impl Into<String>, string: impl Into<String>, priority: i32) -> Self {
        Self { source: source.into(), string: string.into(), priority }
    }
}

/// Append-only destination for emitted fragments.
pub trait ScriptSink {
    fn push(&mut self, fragment: ScriptFragment);
}

impl ScriptSink for Vec<ScriptFragment> {
    fn push(&mut self, fragment: ScriptFragment) {
        Vec::push(self, fragment);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScriptStack {
    fragments: Vec<ScriptFragment>,
}

impl ScriptStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fragments(&self) -> &[ScriptFragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Concatenate fragments, highest priority first. Equal priorities keep
    /// push order.
    pub fn render(&self) -> String {
        let mut ordered: Vec<&ScriptFragment> = self.fragments.iter().collect();
        ordered.sort_by(|a, b| b.priority.cmp(&a.priority));
        ordered.iter().map(|f| f.string.as_str()).collect::<Vec<_>>().join("\n")
    }
}

impl ScriptSink for ScriptStack {
    fn push(&mut self, fragment: ScriptFragment) {
        self.fragments.push(fragment);
    }
}
