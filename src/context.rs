// Wordshard analysis context and engine configuration
// Immutable loaded tables, constructed once and injected into the engine

use std::path::Path;

use log::info;

use crate::tables::{AbbreviationTable, IndicatorTables};
use crate::types::LoadError;
use crate::wordlist::WordList;

/// Headword used when the invocation boundary provides none
pub const DEFAULT_WORD: &str = "example";

/// The static tables every analysis reads: wordlist, abbreviation
/// dictionary, and indicator categories
///
/// Built once at startup (or from fixtures in tests) and shared read-only.
/// The engine treats "no context attached yet" as the loading state.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    pub wordlist: WordList,
    pub abbreviations: AbbreviationTable,
    pub indicators: IndicatorTables,
}

impl AnalysisContext {
    /// Assemble a context from already-loaded tables
    pub fn new(
        wordlist: WordList,
        abbreviations: AbbreviationTable,
        indicators: IndicatorTables,
    ) -> Self {
        Self {
            wordlist,
            abbreviations,
            indicators,
        }
    }

    /// Load all tables from a data directory:
    /// `wordlist.txt`, `abbreviations.json`, `indicators/<id>.json`
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        let wordlist = WordList::from_path(dir.join("wordlist.txt"))?;
        let abbreviations = AbbreviationTable::from_path(dir.join("abbreviations.json"))?;
        let indicators = IndicatorTables::from_dir(dir.join("indicators"))?;
        info!("analysis context loaded from {}", dir.display());
        Ok(Self::new(wordlist, abbreviations, indicators))
    }
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Headword used when none is supplied
    pub default_word: String,

    /// Whether the center rule requires an even length difference
    /// (symmetric padding on both sides)
    pub symmetric_center: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_word: DEFAULT_WORD.to_string(),
            symmetric_center: true,
        }
    }
}
