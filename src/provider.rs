// Wordshard dictionary provider seam
// The async boundary to the external definition/synonym service

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::types::{FetchError, WordData};

/// Inline cross-reference markup carried inside definition text
static XREF_MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?xref[^>]*>").expect("xref pattern is valid"));

/// Most definitions kept per word, matching the request limit
pub const MAX_DEFINITIONS: usize = 5;

/// Most synonyms kept per word, matching the request limit
pub const MAX_SYNONYMS: usize = 10;

/// Asynchronous dictionary/synonym collaborator
///
/// Implementations fetch definitions and related-word synonyms for one
/// word. "Word not found" must be reported as [`FetchError::NotFound`] so
/// the cache can store the sentinel; every other failure is
/// [`FetchError::Transient`] and is never cached.
#[async_trait]
pub trait DictionaryProvider: Send + Sync {
    async fn fetch(&self, word: &str) -> Result<WordData, FetchError>;
}

/// Remove inline cross-reference tags from definition text
pub fn strip_cross_references(text: &str) -> String {
    XREF_MARKUP.replace_all(text, "").into_owned()
}

impl WordData {
    /// Normalize provider output for caching: strip cross-reference markup,
    /// default a missing part of speech to "unknown", and cap the entry at
    /// [`MAX_DEFINITIONS`] definitions and [`MAX_SYNONYMS`] synonyms even
    /// when a provider returns more than it was asked for
    pub fn normalized(mut self) -> Self {
        self.definitions.truncate(MAX_DEFINITIONS);
        self.synonyms.truncate(MAX_SYNONYMS);
        for def in &mut self.definitions {
            def.text = strip_cross_references(&def.text);
            if def.part_of_speech.is_empty() {
                def.part_of_speech = "unknown".to_string();
            }
        }
        self
    }
}
