//! quicktrans-core
//!
//! Dictionary-driven Chinese to Vietnamese translation. Text is segmented by
//! greedy longest match against a phrase trie, each segment is replaced by
//! its dictionary translation, and the joined result is cleaned up
//! (spacing, quotes, sentence capitalization).
//!
//! Public API:
//! - `Trie` - phrase dictionary with exact and longest-prefix lookup
//! - `DictionarySource` / `CachedSource` - where dictionary text comes from
//! - `DictionaryLoader` - concurrent loading of the three dictionary sources
//! - `Dictionary` - loaded tables; `translate` lives here
//! - `Tokenizer` - longest-match segmentation
//! - `normalize` - output cleanup passes
//! - `Config` - source names, duplicate policy and translation options
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod trie;
pub use trie::Trie;

pub mod source;
pub use source::{CachedSource, DictionarySource, DirectorySource, HttpSource, MemorySource};

pub mod loader;
pub use loader::{load_source, parse_line, DictionaryLoader, LoadReport, SourceStats, SourceStatus};

pub mod dictionary;
pub use dictionary::Dictionary;

pub mod tokenizer;
pub use tokenizer::{is_cjk, Token, TokenKind, Tokenizer, Tokens};

pub mod translator;
pub use translator::canonical;

pub mod normalize;
pub mod punctuation;

/// What the loader does when a key appears twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the value seen first (same as the dictionary sanitizer).
    #[default]
    KeepFirst,
    /// Later lines replace earlier ones.
    Overwrite,
}

/// Engine configuration.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Identifier of the proper-name table
    pub names_source: String,
    /// Identifier of the general phrase table
    pub phrases_source: String,
    /// Identifier of the phonetic substitution table
    pub phonetic_source: String,

    pub duplicate_policy: DuplicatePolicy,

    /// Treat `\n` as a token of its own that also ends non-Chinese runs.
    pub split_on_newline: bool,

    /// Function words removed from the output. A token is dropped if either
    /// its source text or its chosen translation is listed.
    pub skipped_words: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            names_source: "Names.txt".to_string(),
            phrases_source: "VietPhrase.txt".to_string(),
            phonetic_source: "ChinesePhienAmWords.txt".to_string(),
            duplicate_policy: DuplicatePolicy::KeepFirst,
            split_on_newline: true,
            // possessive particle, completion marker, continuous aspect
            skipped_words: vec!["的".to_string(), "了".to_string(), "著".to_string()],
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Utility helpers.
pub mod utils {
    /// Unicode NFC form of `s`.
    ///
    /// Dictionary files mix precomposed and decomposed Vietnamese diacritics;
    /// keys and lookups both go through this so they compare equal.
    pub fn nfc(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>()
    }
}
