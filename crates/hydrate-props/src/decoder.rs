//! Decoder emission: the shared dictionary/decoder script and one script
//! per payload.

use hydrate_core::{CompressConfig, DecodeMode, HydrateError, Result};
use serde_json::Value as Json;

use crate::planner::SymbolTable;
use crate::substitute::{substitute, Dictionary};
use crate::symbols;

/// Source of the fragment that carries the dictionary and decoder.
pub const DECODER_SOURCE: &str = "compressProps";

impl Dictionary<Json> for SymbolTable {
    fn value(&self, node: &Json) -> Option<Json> {
        node.as_str().and_then(|s| self.get(s)).cloned()
    }

    fn key(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| match v {
            Json::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

impl SymbolTable {
    /// Undo [`rewrite`](crate::rewriter::rewrite): the Rust twin of the
    /// emitted decoder function.
    pub fn reconstruct(&self, rewritten: &Json) -> Result<Json> {
        substitute(rewritten, self)
    }
}

/// Serialize for embedding inside a `<script>` element. With `script_safe`
/// the characters that could close the element or break the line are
/// written as `\u` escapes; they can only occur inside JSON strings, so the
/// parsed value is unchanged.
pub fn to_script_json(value: &Json, script_safe: bool) -> Result<String> {
    let text = serde_json::to_string(value)?;
    if !script_safe {
        return Ok(text);
    }
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    Ok(out)
}

/// The shared decoder. Its function body mirrors
/// [`substitute`](crate::substitute::substitute) step for step.
pub fn decoder_script(table: &SymbolTable, config: &CompressConfig) -> Result<String> {
    let pairs = to_script_json(&table.to_json(), config.script_safe)?;
    let dic = &config.table_var;
    let f = &config.decoder_fn;
    Ok(format!(
        r#"<script>
var {dic} = new Map({pairs});
var {f} = function (t) {{
  if ({dic}.has(t)) return {dic}.get(t);
  if (Array.isArray(t)) return t.map(function (v) {{ return {f}(v); }});
  if (Object.prototype.toString.call(t) === "[object Object]") {{
    return Object.keys(t).reduce(function (out, k) {{
      Object.defineProperty(out, {dic}.has(k) ? {dic}.get(k) : k, {{
        value: {f}(t[k]), enumerable: true, writable: true, configurable: true
      }});
      return out;
    }}, {{}});
  }}
  return t;
}};
</script>"#
    ))
}

/// `var <name> = ...;` for one rewritten payload.
///
/// In [`DecodeMode::Deferred`] the variable holds the rewritten value and
/// page code must pass it through the decoder function before reading it.
pub fn payload_script(name: &str, rewritten: &Json, config: &CompressConfig) -> Result<String> {
    let json = to_script_json(rewritten, config.script_safe)?;
    let expr = match config.decode_mode {
        DecodeMode::Inline => format!("{}({json})", config.decoder_fn),
        DecodeMode::Deferred => json,
    };
    Ok(format!("<script>\nvar {name} = {expr};\n</script>"))
}

/// Payload names become variables next to the decoder's own two.
pub fn validate_payload_name(name: &str, config: &CompressConfig) -> Result<()> {
    if !symbols::is_identifier(name) || name == config.table_var || name == config.decoder_fn {
        return Err(HydrateError::InvalidPayloadName(name.to_string()));
    }
    Ok(())
}

pub fn validate_config(config: &CompressConfig) -> Result<()> {
    for ident in [&config.table_var, &config.decoder_fn] {
        if !symbols::is_identifier(ident) {
            return Err(anyhow::anyhow!("invalid decoder identifier: {ident:?}").into());
        }
    }
    if config.table_var == config.decoder_fn {
        return Err(anyhow::anyhow!("decoder identifiers must differ").into());
    }
    symbols::validate_alphabet(&config.alphabet_chars())?;
    Ok(())
}
