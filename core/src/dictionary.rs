//! The loaded table set: phrase trie, name table and phonetic table.
//!
//! A [`Dictionary`] only exists once loading has finished, so holding one
//! means the engine is ready. It is never mutated afterwards; to pick up new
//! dictionary files, load a fresh one and swap it in (e.g. behind an
//! `Arc`) instead of editing this one.

use crate::error::Result;
use crate::loader::LoadReport;
use crate::tokenizer::{Tokenizer, Tokens};
use crate::trie::Trie;
use crate::Config;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

#[derive(Debug)]
pub struct Dictionary {
    trie: Trie,
    names: AHashMap<String, String>,
    phonetic: AHashMap<String, String>,
    config: Config,
    report: LoadReport,
}

#[derive(Serialize)]
struct TablesRef<'a> {
    trie: &'a Trie,
    names: &'a AHashMap<String, String>,
    phonetic: &'a AHashMap<String, String>,
}

#[derive(Deserialize)]
struct Tables {
    trie: Trie,
    names: AHashMap<String, String>,
    phonetic: AHashMap<String, String>,
}

impl Dictionary {
    pub(crate) fn new(
        trie: Trie,
        names: AHashMap<String, String>,
        phonetic: AHashMap<String, String>,
        config: Config,
        report: LoadReport,
    ) -> Self {
        Self {
            trie,
            names,
            phonetic,
            config,
            report,
        }
    }

    /// Assemble a dictionary from tables built elsewhere.
    ///
    /// Names are not added to the trie here; callers that want names found by
    /// segmentation insert them into `trie` as well.
    pub fn from_tables(
        trie: Trie,
        names: AHashMap<String, String>,
        phonetic: AHashMap<String, String>,
        config: Config,
    ) -> Self {
        Self::new(trie, names, phonetic, config, LoadReport::prebuilt())
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn names(&self) -> &AHashMap<String, String> {
        &self.names
    }

    pub fn phonetic(&self) -> &AHashMap<String, String> {
        &self.phonetic
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// How each source fared during loading.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Tokenizer over the phrase trie, configured from this dictionary.
    pub fn tokenizer(&self) -> Tokenizer<'_> {
        Tokenizer::new(&self.trie).split_on_newline(self.config.split_on_newline)
    }

    /// Segment `text` as-is, without punctuation conversion.
    pub fn tokenize<'a>(&self, text: &'a str) -> Tokens<'_, 'a> {
        self.tokenizer().tokenize(text)
    }

    /// Save the tables to a file with bincode. Configuration is not saved.
    pub fn save_bincode<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        let tables = TablesRef {
            trie: &self.trie,
            names: &self.names,
            phonetic: &self.phonetic,
        };
        bincode::serialize_into(writer, &tables)?;
        Ok(())
    }

    /// Load tables written by `save_bincode`.
    pub fn load_bincode<P: AsRef<Path>>(path: P, config: Config) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let tables: Tables = bincode::deserialize_from(reader)?;
        Ok(Self::from_tables(
            tables.trie,
            tables.names,
            tables.phonetic,
            config,
        ))
    }
}
