// Wordshard type definitions
// Core types for dictionary data, lookup errors, and render-ready results

use thiserror::Error;

use crate::nav::PatternQuery;
use crate::positional::MatchSet;

/// A single dictionary definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Part of speech (e.g., "noun"); "unknown" when the provider omits it
    pub part_of_speech: String,

    /// Definition text with cross-reference markup already stripped
    pub text: String,
}

impl Definition {
    /// Create a new definition
    pub fn new(part_of_speech: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            part_of_speech: part_of_speech.into(),
            text: text.into(),
        }
    }
}

/// Dictionary data for one word: definitions plus the synonym list
/// extracted from the provider's related-words response
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WordData {
    pub definitions: Vec<Definition>,
    pub synonyms: Vec<String>,
}

/// A resolved cache entry for one fragment
///
/// `NotFound` is the sentinel for a word the dictionary does not know.
/// It is a normal, cacheable outcome, not an error: future lookups for the
/// same fragment short-circuit without refetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry {
    Found(WordData),
    NotFound,
}

/// Dictionary fetch failures
///
/// `NotFound` is the 404-equivalent outcome and gets cached as a sentinel.
/// `Transient` covers network/auth/parse failures; those are never cached,
/// so a later attempt may succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("word not found")]
    NotFound,

    #[error("dictionary lookup failed: {0}")]
    Transient(String),
}

/// Errors from the startup loaders (wordlist, abbreviation table,
/// indicator categories)
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read data source: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse data source: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Render-ready result of dispatching the current (mode, submode, fragment)
///
/// Every consumer must handle every case; in particular `NotReady` (a table
/// is still loading) is distinct from an empty `List`, and `Pending` (a
/// dictionary fetch is in flight) is distinct from `NoSelection`.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    /// Plain text line (no-result messages, simple views)
    Text(String),

    /// Flat ordered list of display lines
    List(Vec<String>),

    /// Grouped lists, e.g. indicator phrases by sub-category
    Grouped(Vec<(String, Vec<String>)>),

    /// Positional search outcome with truncation metadata
    Matches(MatchSet),

    /// Pattern string handed to an external pattern-search collaborator
    Pattern(PatternQuery),

    /// The fragment has no cached dictionary data yet; offer an explicit
    /// lookup instead of fetching on every selection change
    LookupOffer(String),

    /// No letters are selected
    NoSelection,

    /// A dictionary fetch for the current fragment is in flight
    Pending,

    /// A required table has not finished loading
    NotReady,

    /// Retryable transient failure, surfaced verbatim
    ErrorMessage(String),
}
