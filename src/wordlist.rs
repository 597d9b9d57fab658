// Wordshard wordlist
// Immutable set of lowercase words shared by the anagram and positional engines

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;
use rustc_hash::FxHashSet;

use crate::types::LoadError;

/// Deduplicated set of lowercase words, loaded once and read-only thereafter
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: FxHashSet<String>,
}

impl WordList {
    /// Build a wordlist from an iterator of words (fixtures, tests)
    ///
    /// Entries are trimmed and lowercased; empties are dropped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Load a newline-delimited wordlist from a reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, LoadError> {
        let mut words = FxHashSet::default();
        for line in reader.lines() {
            let word = line?.trim().to_lowercase();
            if !word.is_empty() {
                words.insert(word);
            }
        }
        info!("loaded wordlist: {} words", words.len());
        Ok(Self { words })
    }

    /// Load a newline-delimited wordlist from a file path
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Case-insensitive membership test
    pub fn contains(&self, word: &str) -> bool {
        if word.chars().any(|c| c.is_uppercase()) {
            self.words.contains(&word.to_lowercase())
        } else {
            self.words.contains(word)
        }
    }

    /// Iterate over the words (no ordering guarantee)
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.as_str())
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list holds no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
