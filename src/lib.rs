//! # Wordshard: Fragment Analysis Engine
//!
//! Wordplay analysis over letter subsets ("fragments") of a headword:
//! dictionary/synonym lookup, abbreviation lookup, anagram search, and
//! positional substring search, with formatted pattern hand-off to external
//! pattern-matching services.
//!
//! ## Components
//!
//! - **Letter Selection** - headword + selected indices → fragment
//! - **Anagram Engine** - distinct multiset permutations, wordlist-filtered
//! - **Positional Matcher** - starts/ends/center search with ranking and truncation
//! - **Fragment Data Cache** - memoized, single-flight dictionary lookups
//! - **Static Tables** - abbreviation dictionary and indicator categories
//! - **Navigation** - (mode, submode) state machine and dispatch
//!
//! ## Example Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use wordshard::{AnalysisContext, Engine, ModeId};
//!
//! let mut engine = Engine::new(Arc::new(provider));
//! engine.set_headword(Some("planet"));
//! engine.attach_context(AnalysisContext::load_from_dir("data")?);
//!
//! // Narrow the selection to "pla" and look for anagrams.
//! engine.toggle_letter(3);
//! engine.toggle_letter(4);
//! engine.toggle_letter(5);
//! engine.select_mode(ModeId::Anagram);
//! let result = engine.dispatch();
//!
//! // Dictionary views resolve asynchronously through the cache.
//! engine.select_mode(ModeId::Definition);
//! engine.begin_fetch().await;
//! # Ok::<(), wordshard::LoadError>(())
//! ```
//!
//! Selection toggling, fragment derivation, anagram generation, positional
//! search, and table lookups are synchronous and never block; only the
//! dictionary collaborator boundary suspends. A fetch that resolves after
//! the selection has changed updates the cache but never the display.

pub mod anagram;
pub mod cache;
pub mod context;
pub mod engine;
pub mod nav;
pub mod positional;
pub mod provider;
pub mod selection;
pub mod tables;
pub mod types;
pub mod wordlist;

// Re-export main types for convenience
pub use cache::FragmentDataCache;
pub use context::{AnalysisContext, EngineConfig, DEFAULT_WORD};
pub use engine::Engine;
pub use nav::{Mode, ModeId, Navigation, PatternQuery, PatternTarget, SubmodeId, MODES};
pub use positional::{MatchSet, PositionalRule, RESULT_LIMIT};
pub use provider::DictionaryProvider;
pub use selection::LetterSelection;
pub use tables::{AbbreviationTable, IndicatorCategory, IndicatorTables};
pub use types::{
    AnalysisResult, CacheEntry, Definition, FetchError, LoadError, WordData,
};
pub use wordlist::WordList;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
