// Integration tests for the engine: dispatch, navigation, and the
// asynchronous dictionary flow

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use wordshard::{
    AbbreviationTable, AnalysisContext, AnalysisResult, DictionaryProvider, Definition, Engine,
    FetchError, IndicatorCategory, IndicatorTables, ModeId, SubmodeId, WordData, WordList,
};

/// Provider that blocks each fetch until the test releases a permit
struct GatedProvider {
    calls: AtomicUsize,
    gate: Semaphore,
}

impl GatedProvider {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            gate: Semaphore::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn release(&self) {
        self.gate.add_permits(1);
    }
}

#[async_trait]
impl DictionaryProvider for GatedProvider {
    async fn fetch(&self, word: &str) -> Result<WordData, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| FetchError::Transient("gate closed".to_string()))?;
        permit.forget();
        Ok(WordData {
            definitions: vec![Definition::new(
                "noun",
                format!("the <xref>meaning</xref> of {}", word),
            )],
            synonyms: vec![format!("{}-like", word)],
        })
    }
}

fn fixture_context() -> AnalysisContext {
    let wordlist = WordList::from_words(["bat", "tab", "stab", "bats", "abates"]);
    let abbreviations = AbbreviationTable::from_entries([(
        "ab",
        vec!["able seaman".to_string(), "about".to_string()],
    )]);
    let mut indicators = IndicatorTables::new();
    indicators
        .load_category(
            IndicatorCategory::Anagrams,
            r#"{ "mixing": ["stirred", "shaken"] }"#.as_bytes(),
        )
        .unwrap();
    AnalysisContext::new(wordlist, abbreviations, indicators)
}

fn build_engine(word: &str) -> (Engine, Arc<GatedProvider>) {
    let provider = GatedProvider::new();
    let mut engine = Engine::new(provider.clone());
    engine.set_headword(Some(word));
    engine.attach_context(fixture_context());
    (engine, provider)
}

// ============ Navigation ============

#[test]
fn test_composite_mode_resets_submode() {
    let (mut engine, _provider) = build_engine("bat");

    engine.select_mode(ModeId::Starts);
    assert_eq!(engine.submode(), Some(SubmodeId::Wordlist));

    engine.select_submode(SubmodeId::Onelook);
    assert_eq!(engine.submode(), Some(SubmodeId::Onelook));

    engine.select_mode(ModeId::Starts);
    assert_eq!(engine.submode(), Some(SubmodeId::Wordlist));
}

#[test]
fn test_simple_mode_clears_submode() {
    let (mut engine, _provider) = build_engine("bat");
    engine.select_mode(ModeId::Indicators);
    assert!(engine.submode().is_some());
    engine.select_mode(ModeId::Definition);
    assert_eq!(engine.submode(), None);
}

#[test]
fn test_unknown_mode_id_is_absorbed() {
    let (mut engine, _provider) = build_engine("bat");
    engine.select_mode_id("wordplay");
    assert_eq!(engine.mode(), ModeId::Definition);
}

// ============ Dispatch ============

#[test]
fn test_fragment_follows_toggle_order_independence() {
    let (mut engine, _provider) = build_engine("stab");
    engine.clear_selection();
    engine.toggle_letter(3); // b
    engine.toggle_letter(1); // t
    engine.toggle_letter(2); // a
    assert_eq!(engine.fragment(), "tab");
}

#[test]
fn test_anagram_dispatch_uses_selection() {
    let (mut engine, _provider) = build_engine("stab");
    // Drop the "s": fragment "tab".
    engine.toggle_letter(0);
    engine.select_mode(ModeId::Anagram);
    assert_eq!(
        engine.dispatch(),
        AnalysisResult::List(vec!["bat".to_string(), "tab".to_string()])
    );
}

#[test]
fn test_abbreviation_dispatch() {
    let (mut engine, _provider) = build_engine("ab");
    engine.select_mode(ModeId::Abbreviations);
    assert_eq!(
        engine.dispatch(),
        AnalysisResult::List(vec!["able seaman".to_string(), "about".to_string()])
    );
}

#[test]
fn test_indicator_dispatch() {
    let (mut engine, _provider) = build_engine("bat");
    engine.select_mode(ModeId::Indicators);
    assert_eq!(
        engine.dispatch(),
        AnalysisResult::Grouped(vec![(
            "mixing".to_string(),
            vec!["stirred".to_string(), "shaken".to_string()],
        )])
    );
}

#[test]
fn test_pattern_dispatch_for_each_mode() {
    let (mut engine, _provider) = build_engine("bat");
    let cases = [
        (ModeId::Anagram, "<bat>"),
        (ModeId::Starts, "bat*"),
        (ModeId::Ends, "*bat"),
        (ModeId::Center, "A<bat>A"),
    ];
    for (mode, expected) in cases {
        engine.select_mode(mode);
        engine.select_submode(SubmodeId::Nutrimatic);
        match engine.dispatch() {
            AnalysisResult::Pattern(query) => assert_eq!(query.pattern, expected),
            other => panic!("expected pattern for {:?}, got {:?}", mode, other),
        }
    }
}

#[test]
fn test_not_ready_without_context() {
    let provider = GatedProvider::new();
    let mut engine = Engine::new(provider);
    engine.set_headword(Some("bat"));
    engine.select_mode(ModeId::Center);
    // Wordlist not loaded: loading state, not a zero-match result.
    assert_eq!(engine.dispatch(), AnalysisResult::NotReady);
}

// ============ Dictionary Flow ============

#[tokio::test]
async fn test_fetch_strips_cross_reference_markup() {
    let (engine, provider) = build_engine("bat");
    provider.release();
    let result = engine.begin_fetch().await;
    assert_eq!(
        result,
        Some(AnalysisResult::List(vec![
            "(noun) the meaning of bat".to_string()
        ]))
    );
}

#[tokio::test]
async fn test_synonyms_view_after_fetch() {
    let (mut engine, provider) = build_engine("bat");
    engine.select_mode(ModeId::Synonyms);
    provider.release();
    engine.begin_fetch().await;
    assert_eq!(
        engine.dispatch(),
        AnalysisResult::List(vec!["bat-like".to_string()])
    );
}

#[tokio::test]
async fn test_concurrent_fetches_share_one_request() {
    let (engine, provider) = build_engine("bat");

    let f1 = engine.begin_fetch();
    let f2 = engine.begin_fetch();
    let t1 = tokio::spawn(f1);
    let t2 = tokio::spawn(f2);
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
    assert_eq!(provider.calls(), 1);

    provider.release();
    let r1 = t1.await.unwrap();
    let r2 = t2.await.unwrap();
    assert_eq!(r1, r2);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let (mut engine, provider) = build_engine("cat");

    let pending = tokio::spawn(engine.begin_fetch());
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }

    engine.set_headword(Some("dog"));
    let display_before = engine.display();

    provider.release();
    assert_eq!(pending.await.unwrap(), None);
    assert_eq!(engine.display(), display_before);
}

#[tokio::test]
async fn test_cached_entry_short_circuits_refetch() {
    let (engine, provider) = build_engine("bat");
    provider.release();
    engine.begin_fetch().await;
    assert_eq!(provider.calls(), 1);

    // A second fetch for the same fragment resolves from the cache.
    engine.begin_fetch().await;
    assert_eq!(provider.calls(), 1);
}
