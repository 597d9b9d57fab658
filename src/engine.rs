// Wordshard engine
// Orchestrates selection, navigation, the lookup tables, and the
// dictionary cache into render-ready results

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use log::debug;

use crate::anagram;
use crate::cache::FragmentDataCache;
use crate::context::{AnalysisContext, EngineConfig};
use crate::nav::{self, ModeId, Navigation, PatternQuery, PatternTarget, SubmodeId};
use crate::positional::{self, PositionalRule};
use crate::provider::DictionaryProvider;
use crate::selection::LetterSelection;
use crate::tables::IndicatorCategory;
use crate::types::{AnalysisResult, CacheEntry};

/// The fragment analysis engine
///
/// Holds the letter selection, the navigation state, and the fragment data
/// cache. Synchronous operations (toggling, mode switches, local searches)
/// run to completion immediately; dictionary lookups go through
/// [`Engine::begin_fetch`], whose completion is discarded if the selection
/// or navigation changed while it was in flight.
pub struct Engine {
    config: EngineConfig,
    selection: LetterSelection,
    nav: Navigation,
    cache: FragmentDataCache,
    context: Option<Arc<AnalysisContext>>,
    /// Bumped on every selection/navigation change; fetches capture it at
    /// issue time and compare at resolve time to discard stale responses
    epoch: Arc<AtomicU64>,
    display: Arc<Mutex<AnalysisResult>>,
}

impl Engine {
    /// Create an engine with the default configuration
    pub fn new(provider: Arc<dyn DictionaryProvider>) -> Self {
        Self::with_config(EngineConfig::default(), provider)
    }

    /// Create an engine with an explicit configuration
    pub fn with_config(config: EngineConfig, provider: Arc<dyn DictionaryProvider>) -> Self {
        let selection = LetterSelection::new(&config.default_word);
        let engine = Self {
            config,
            selection,
            nav: Navigation::new(),
            cache: FragmentDataCache::new(provider),
            context: None,
            epoch: Arc::new(AtomicU64::new(0)),
            display: Arc::new(Mutex::new(AnalysisResult::Pending)),
        };
        engine.touch();
        engine
    }

    /// Replace the headword; `None` or empty falls back to the configured
    /// default. The selection resets to all letters.
    pub fn set_headword(&mut self, word: Option<&str>) {
        let word = match word {
            Some(w) if !w.trim().is_empty() => w.trim().to_string(),
            _ => self.config.default_word.clone(),
        };
        self.selection.set_word(&word);
        self.touch();
    }

    /// Attach the loaded tables; until this is called, table-backed
    /// analyses report `NotReady`
    pub fn attach_context(&mut self, context: AnalysisContext) {
        self.context = Some(Arc::new(context));
        self.touch();
    }

    /// Current headword
    pub fn headword(&self) -> &str {
        self.selection.word()
    }

    /// Current fragment
    pub fn fragment(&self) -> String {
        self.selection.fragment()
    }

    /// Read-only view of the letter selection
    pub fn selection(&self) -> &LetterSelection {
        &self.selection
    }

    /// Active mode
    pub fn mode(&self) -> ModeId {
        self.nav.mode()
    }

    /// Active submode
    pub fn submode(&self) -> Option<SubmodeId> {
        self.nav.submode()
    }

    /// The fragment data cache (shared, cheap to clone)
    pub fn cache(&self) -> &FragmentDataCache {
        &self.cache
    }

    /// Whether a dictionary fetch is in flight
    pub fn is_fetching(&self) -> bool {
        self.cache.is_fetching()
    }

    /// Flip one letter's selection; out-of-range indices are ignored
    pub fn toggle_letter(&mut self, index: usize) {
        self.selection.toggle(index);
        self.touch();
    }

    /// Select every letter
    pub fn select_all(&mut self) {
        self.selection.select_all();
        self.touch();
    }

    /// Deselect every letter
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.touch();
    }

    /// Switch modes
    pub fn select_mode(&mut self, mode: ModeId) {
        self.nav.select_mode(mode);
        self.touch();
    }

    /// Switch modes by id string; unknown ids are a no-op
    pub fn select_mode_id(&mut self, id: &str) {
        self.nav.select_mode_id(id);
        self.touch();
    }

    /// Switch submodes; invalid selections are a no-op
    pub fn select_submode(&mut self, submode: SubmodeId) {
        self.nav.select_submode(submode);
        self.touch();
    }

    /// The current render-ready result
    pub fn display(&self) -> AnalysisResult {
        self.display.lock().expect("display poisoned").clone()
    }

    /// Bump the epoch and re-evaluate the display for the current state
    fn touch(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        let result = self.dispatch();
        *self.display.lock().expect("display poisoned") = result;
    }

    /// Evaluate the current (mode, submode, fragment) into a result
    ///
    /// Pure with respect to engine state: runs entirely within one
    /// scheduling turn and never blocks. Dictionary views read the cache
    /// without triggering a fetch.
    pub fn dispatch(&self) -> AnalysisResult {
        let fragment = self.selection.fragment();
        let mode = self.nav.mode();

        // Empty fragment short-circuits every mode except the default
        // dictionary view, which falls back to the full headword.
        if fragment.is_empty() && mode != ModeId::Definition {
            return AnalysisResult::NoSelection;
        }

        match mode {
            ModeId::Definition | ModeId::Synonyms => self.dictionary_view(mode, &fragment),
            ModeId::Abbreviations => self.abbreviation_view(&fragment),
            ModeId::Anagram | ModeId::Starts | ModeId::Ends | ModeId::Center => {
                match self.nav.submode() {
                    Some(SubmodeId::Nutrimatic) => pattern_query(mode, &fragment, PatternTarget::Nutrimatic),
                    Some(SubmodeId::Onelook) => pattern_query(mode, &fragment, PatternTarget::Onelook),
                    _ => self.wordlist_view(mode, &fragment),
                }
            }
            ModeId::Indicators => {
                let category = match self.nav.submode() {
                    Some(SubmodeId::Indicator(category)) => category,
                    _ => IndicatorCategory::Anagrams,
                };
                self.indicator_view(category)
            }
        }
    }

    /// Definition/synonym view backed by the fragment data cache
    fn dictionary_view(&self, mode: ModeId, fragment: &str) -> AnalysisResult {
        let target = if fragment.is_empty() {
            self.selection.word().to_string()
        } else {
            fragment.to_string()
        };
        match self.cache.peek(&target) {
            Some(entry) => render_entry(mode, &target, &entry),
            None if self.cache.is_pending(&target) => AnalysisResult::Pending,
            None => AnalysisResult::LookupOffer(target),
        }
    }

    fn abbreviation_view(&self, fragment: &str) -> AnalysisResult {
        let Some(ctx) = &self.context else {
            return AnalysisResult::NotReady;
        };
        match ctx.abbreviations.lookup(fragment) {
            Some(meanings) => AnalysisResult::List(meanings.to_vec()),
            None => AnalysisResult::Text(format!(
                "No cryptic abbreviations found for \"{}\"",
                fragment
            )),
        }
    }

    /// Local wordlist analysis for the anagram and positional modes
    fn wordlist_view(&self, mode: ModeId, fragment: &str) -> AnalysisResult {
        let Some(ctx) = &self.context else {
            return AnalysisResult::NotReady;
        };
        match mode {
            ModeId::Anagram => {
                let anagrams = anagram::generate(fragment);
                let found = anagram::filter_against_wordlist(&anagrams, &ctx.wordlist);
                if found.is_empty() {
                    AnalysisResult::Text(format!("No valid anagrams found for \"{}\"", fragment))
                } else {
                    AnalysisResult::List(found)
                }
            }
            ModeId::Starts | ModeId::Ends | ModeId::Center => {
                let rule = match mode {
                    ModeId::Starts => PositionalRule::Starts,
                    ModeId::Ends => PositionalRule::Ends,
                    _ => PositionalRule::Center {
                        symmetric: self.config.symmetric_center,
                    },
                };
                let matches = positional::search(rule, fragment, &ctx.wordlist);
                if matches.is_empty() {
                    AnalysisResult::Text(format!("No words found for \"{}\"", fragment))
                } else {
                    AnalysisResult::Matches(matches)
                }
            }
            _ => AnalysisResult::NoSelection,
        }
    }

    fn indicator_view(&self, category: IndicatorCategory) -> AnalysisResult {
        let Some(ctx) = &self.context else {
            return AnalysisResult::NotReady;
        };
        match ctx.indicators.lookup(category) {
            Some(list) => AnalysisResult::Grouped(
                list.iter()
                    .map(|(label, phrases)| (label.clone(), phrases.clone()))
                    .collect(),
            ),
            None => AnalysisResult::Text(format!("No indicators loaded for \"{}\"", category)),
        }
    }

    /// Start a dictionary fetch for the current fragment (or the headword
    /// when nothing narrower is selected)
    ///
    /// The returned future does not borrow the engine. On completion it
    /// updates the display only if no selection or navigation change
    /// happened since issue; a stale response still populates the cache
    /// but returns `None` and leaves the display alone.
    pub fn begin_fetch(&self) -> impl Future<Output = Option<AnalysisResult>> + Send + 'static {
        let fragment = self.selection.fragment();
        let target = if fragment.is_empty() {
            self.selection.word().to_string()
        } else {
            fragment
        };
        let mode = self.nav.mode();
        let cache = self.cache.clone();
        let epoch = Arc::clone(&self.epoch);
        let issued = self.epoch.load(Ordering::SeqCst);
        let display = Arc::clone(&self.display);

        async move {
            let result = match cache.get(&target).await {
                Ok(entry) => render_entry(mode, &target, &entry),
                Err(err) => AnalysisResult::ErrorMessage(err.to_string()),
            };
            if epoch.load(Ordering::SeqCst) != issued {
                debug!("discarding stale dictionary response for '{}'", target);
                return None;
            }
            *display.lock().expect("display poisoned") = result.clone();
            Some(result)
        }
    }
}

/// Render a resolved cache entry for the definition or synonyms view
fn render_entry(mode: ModeId, target: &str, entry: &CacheEntry) -> AnalysisResult {
    let view = if mode == ModeId::Synonyms {
        "synonyms"
    } else {
        "definitions"
    };
    match entry {
        CacheEntry::NotFound => {
            AnalysisResult::Text(format!("No dictionary entry found for \"{}\"", target))
        }
        CacheEntry::Found(data) => {
            let lines: Vec<String> = if mode == ModeId::Synonyms {
                data.synonyms.clone()
            } else {
                data.definitions
                    .iter()
                    .map(|def| format!("({}) {}", def.part_of_speech, def.text))
                    .collect()
            };
            if lines.is_empty() {
                AnalysisResult::Text(format!("No {} found for \"{}\"", view, target))
            } else {
                AnalysisResult::List(lines)
            }
        }
    }
}

/// Format a pattern hand-off for an external collaborator
fn pattern_query(mode: ModeId, fragment: &str, target: PatternTarget) -> AnalysisResult {
    match nav::pattern_for(mode, fragment) {
        Some(pattern) => AnalysisResult::Pattern(PatternQuery { target, pattern }),
        None => AnalysisResult::NoSelection,
    }
}
