use serde::{Deserialize, Serialize};

/// Symbol alphabet: Latin-1 punctuation and letters first, so early ranks
/// never look like identifiers a template author would write by hand.
pub const DEFAULT_ALPHABET: &str = "¢£¤¥¦§¨©ª«¬®¯°±²³´µ¶·¸¹º»¼½¾¿ÀÁÂÃÄÅÆÇÈÉÊËÌÍÎÏÐÑÒÓÔÕÖ×ØÙÚÛÜÝÞßàáâãäåæçèéêëìíîïðñòóôõö÷øùúûüýþÿabcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ$?|^%#@+-)(.:;*&¡";

/// How payload scripts hand their value to page code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeMode {
    /// `var name = _$(<rewritten>);`, so the variable holds the original value.
    Inline,
    /// `var name = <rewritten>;`. Consumers must call the decoder themselves.
    Deferred,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressConfig {
    pub alphabet: String,
    pub table_var: String,
    pub decoder_fn: String,
    pub priority: i32,
    pub decode_mode: DecodeMode,
    pub script_safe: bool,
}

impl CompressConfig {
    pub fn from_json(s: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn with_decode_mode(mut self, mode: DecodeMode) -> Self {
        self.decode_mode = mode;
        self
    }

    pub fn alphabet_chars(&self) -> Vec<char> {
        self.alphabet.chars().collect()
    }
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.into(),
            table_var: "dic".into(),
            decoder_fn: "_$".into(),
            priority: 100,
            decode_mode: DecodeMode::Inline,
            script_safe: true,
        }
    }
}
