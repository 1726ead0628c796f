use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub tokenizer: TokenizerConfig,
}

/// Optional normalization steps applied on top of lowercase + alphanumeric splitting.
///
/// Everything is off by default, so a word that appears in a document always
/// finds it again when searched on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// NFKC-normalize before lowercasing, e.g. `ﬁ` -> `fi`.
    pub unicode_normalization: bool,
    /// Drop English stop words.
    pub stopwords: bool,
    /// Reduce tokens to their English stem.
    pub stemming: bool,
}

impl TokenizerConfig {
    /// Default config overlaid with `TEXTINDEX_NFKC`, `TEXTINDEX_STOPWORDS` and `TEXTINDEX_STEM`.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(v) = env_flag("TEXTINDEX_NFKC") { cfg.unicode_normalization = v; }
        if let Some(v) = env_flag("TEXTINDEX_STOPWORDS") { cfg.stopwords = v; }
        if let Some(v) = env_flag("TEXTINDEX_STEM") { cfg.stemming = v; }
        cfg
    }
}

impl IndexConfig {
    pub fn from_env() -> Self {
        Self { tokenizer: TokenizerConfig::from_env() }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    let val = std::env::var(name).ok()?;
    let parsed = parse_flag(&val);
    if parsed.is_none() {
        tracing::warn!(name, value = %val, "ignoring unrecognized flag value");
    }
    parsed
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
