//! Dictionary loading.
//!
//! Raw sources are line-oriented `key=value` text. Parsing is tolerant: blank
//! lines are ignored, and lines without `=` or with an empty key are skipped
//! and counted. Validation belongs to the sanitizer that prepares the files.
//!
//! [`DictionaryLoader::load_all`] fetches and parses the three sources (names,
//! phrases, phonetic substitutions) concurrently, waits for all of them, and
//! then builds the tables in a fixed order. A failed source leaves its table
//! empty and does not affect the other two.

use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::source::{CachedSource, DictionarySource};
use crate::trie::Trie;
use crate::{utils, Config, DuplicatePolicy};
use ahash::AHashMap;
use std::fmt;
use std::thread::ScopedJoinHandle;
use tracing::{debug, info, warn};

/// Split one dictionary line into a trimmed `(key, value)` pair.
///
/// Splits on the first `=` only, so values may contain `=`. Returns `None`
/// for blank lines, lines without `=`, and empty keys. Empty values are kept.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// Counts for one parsed source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceStats {
    /// Pairs handed to the callback.
    pub entries: usize,
    /// Non-blank lines that did not parse.
    pub skipped: usize,
}

/// Feed every well-formed pair of `content` to `on_pair`, in file order.
pub fn load_source<F>(content: &str, mut on_pair: F) -> SourceStats
where
    F: FnMut(&str, &str),
{
    let mut stats = SourceStats::default();
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some((key, value)) => {
                on_pair(key, value);
                stats.entries += 1;
            }
            None => stats.skipped += 1,
        }
    }
    stats
}

/// Outcome of loading one source.
#[derive(Debug)]
pub enum SourceStatus {
    Loaded(SourceStats),
    /// The table stayed empty.
    Failed(Error),
    /// Tables were not loaded from sources (snapshot or handed in directly).
    Prebuilt,
}

impl SourceStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, SourceStatus::Failed(_))
    }
}

impl fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceStatus::Loaded(s) => write!(f, "{} entries, {} skipped", s.entries, s.skipped),
            SourceStatus::Failed(e) => write!(f, "failed: {}", e),
            SourceStatus::Prebuilt => f.write_str("prebuilt"),
        }
    }
}

/// Per-source outcome of [`DictionaryLoader::load_all`].
#[derive(Debug)]
pub struct LoadReport {
    pub names: SourceStatus,
    pub phrases: SourceStatus,
    pub phonetic: SourceStatus,
}

impl LoadReport {
    pub(crate) fn prebuilt() -> Self {
        Self {
            names: SourceStatus::Prebuilt,
            phrases: SourceStatus::Prebuilt,
            phonetic: SourceStatus::Prebuilt,
        }
    }

    /// True when no source failed.
    pub fn is_complete(&self) -> bool {
        !self.names.is_failed() && !self.phrases.is_failed() && !self.phonetic.is_failed()
    }

    /// The errors of failed sources.
    pub fn failures(&self) -> Vec<&Error> {
        [&self.names, &self.phrases, &self.phonetic]
            .into_iter()
            .filter_map(|s| match s {
                SourceStatus::Failed(e) => Some(e),
                _ => None,
            })
            .collect()
    }
}

// Pairs collected off-thread, NFC-normalized.
#[derive(Debug)]
struct ParsedSource {
    pairs: Vec<(String, String)>,
    stats: SourceStats,
}

fn store(map: &mut AHashMap<String, String>, policy: DuplicatePolicy, key: &str, value: &str) {
    match policy {
        DuplicatePolicy::KeepFirst => {
            map.entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }
        DuplicatePolicy::Overwrite => {
            map.insert(key.to_string(), value.to_string());
        }
    }
}

fn store_in_trie(trie: &mut Trie, policy: DuplicatePolicy, key: &str, value: &str) {
    match policy {
        DuplicatePolicy::KeepFirst => {
            trie.insert_if_absent(key, value);
        }
        DuplicatePolicy::Overwrite => trie.insert(key, value),
    }
}

/// Builds a [`Dictionary`] from a source provider.
///
/// The provider is wrapped in a [`CachedSource`] owned by the loader, so
/// repeated loads through the same loader fetch each identifier once. The
/// cache lives as long as the loader, not the [`Dictionary`] it returns;
/// dropping the loader drops the cached contents.
pub struct DictionaryLoader<S> {
    source: CachedSource<S>,
    config: Config,
}

impl<S: DictionarySource> DictionaryLoader<S> {
    pub fn new(source: S, config: Config) -> Self {
        Self {
            source: CachedSource::new(source),
            config,
        }
    }

    pub fn source(&self) -> &CachedSource<S> {
        &self.source
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn read_source(&self, id: &str) -> Result<ParsedSource> {
        let content = self.source.fetch_shared(id)?;
        let mut pairs = Vec::new();
        let stats = load_source(&content, |key, value| {
            pairs.push((utils::nfc(key), utils::nfc(value)));
        });
        debug!(
            source = id,
            entries = stats.entries,
            skipped = stats.skipped,
            "parsed dictionary source"
        );
        Ok(ParsedSource { pairs, stats })
    }

    /// Load all three sources and build the tables.
    ///
    /// Sources are fetched on separate threads; this returns only after every
    /// one of them has finished or failed.
    pub fn load_all(&self) -> Dictionary {
        let cfg = &self.config;
        let (names, phrases, phonetic) = std::thread::scope(|scope| {
            let names = scope.spawn(|| self.read_source(&cfg.names_source));
            let phrases = scope.spawn(|| self.read_source(&cfg.phrases_source));
            let phonetic = scope.spawn(|| self.read_source(&cfg.phonetic_source));

            (
                join_source(names, &cfg.names_source),
                join_source(phrases, &cfg.phrases_source),
                join_source(phonetic, &cfg.phonetic_source),
            )
        });

        let policy = cfg.duplicate_policy;
        let mut trie = Trie::new();
        let mut name_table = AHashMap::new();
        let mut phonetic_table = AHashMap::new();

        let names = settle(&cfg.names_source, names, |pairs| {
            for (key, value) in pairs {
                store(&mut name_table, policy, key, value);
                // names also go into the trie so segmentation can find them
                store_in_trie(&mut trie, policy, key, value);
            }
        });
        let phrases = settle(&cfg.phrases_source, phrases, |pairs| {
            for (key, value) in pairs {
                store_in_trie(&mut trie, policy, key, value);
            }
        });
        let phonetic = settle(&cfg.phonetic_source, phonetic, |pairs| {
            for (key, value) in pairs {
                store(&mut phonetic_table, policy, key, value);
            }
        });

        let report = LoadReport {
            names,
            phrases,
            phonetic,
        };
        info!(
            phrases = trie.len(),
            names = name_table.len(),
            phonetic = phonetic_table.len(),
            complete = report.is_complete(),
            "dictionary ready"
        );

        Dictionary::new(trie, name_table, phonetic_table, self.config.clone(), report)
    }
}

fn join_source(handle: ScopedJoinHandle<'_, Result<ParsedSource>>, id: &str) -> Result<ParsedSource> {
    handle
        .join()
        .unwrap_or_else(|_| Err(Error::unavailable(id, "loader thread panicked")))
}

fn settle<F>(id: &str, parsed: Result<ParsedSource>, build: F) -> SourceStatus
where
    F: FnOnce(&[(String, String)]),
{
    match parsed {
        Ok(parsed) => {
            build(&parsed.pairs);
            SourceStatus::Loaded(parsed.stats)
        }
        Err(e) => {
            warn!(source = id, error = %e, "dictionary source failed, table left empty");
            SourceStatus::Failed(e)
        }
    }
}
