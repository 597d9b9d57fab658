// Wordshard fragment data cache
// Memoized, race-safe asynchronous lookup of per-fragment dictionary data

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::provider::DictionaryProvider;
use crate::types::{CacheEntry, FetchError};

type SharedFetch = Shared<BoxFuture<'static, Result<CacheEntry, FetchError>>>;

struct CacheShared {
    provider: Arc<dyn DictionaryProvider>,
    state: Mutex<CacheState>,
    in_flight: AtomicUsize,
}

#[derive(Default)]
struct CacheState {
    /// Resolved entries, grow-only for the session
    entries: FxHashMap<String, CacheEntry>,

    /// Single-flight table: at most one fetch per fragment; concurrent
    /// callers share the same future
    pending: FxHashMap<String, SharedFetch>,
}

/// Grow-only cache of dictionary data keyed by fragment
///
/// Contract:
/// - a resolved entry (including the not-found sentinel) is returned
///   immediately and never refetched;
/// - concurrent `get` calls for the same fragment share one in-flight
///   fetch;
/// - transient failures are surfaced but never cached, so the key stays
///   absent and a later call retries.
///
/// Cloning is cheap and shares the underlying cache.
#[derive(Clone)]
pub struct FragmentDataCache {
    shared: Arc<CacheShared>,
}

impl FragmentDataCache {
    /// Create an empty cache backed by `provider`
    pub fn new(provider: Arc<dyn DictionaryProvider>) -> Self {
        Self {
            shared: Arc::new(CacheShared {
                provider,
                state: Mutex::new(CacheState::default()),
                in_flight: AtomicUsize::new(0),
            }),
        }
    }

    /// Return the cached entry for `fragment`, fetching it if needed
    ///
    /// The fetch is issued at most once per fragment; a transient failure
    /// leaves the key absent so the next call retries.
    pub async fn get(&self, fragment: &str) -> Result<CacheEntry, FetchError> {
        let fetch = {
            let mut state = self.shared.state.lock().expect("cache state poisoned");
            if let Some(entry) = state.entries.get(fragment) {
                return Ok(entry.clone());
            }
            if let Some(fetch) = state.pending.get(fragment) {
                fetch.clone()
            } else {
                let fetch = self.issue_fetch(fragment.to_string());
                state.pending.insert(fragment.to_string(), fetch.clone());
                self.shared.in_flight.fetch_add(1, Ordering::SeqCst);
                fetch
            }
        };
        fetch.await
    }

    /// Build the shared fetch future for one fragment
    fn issue_fetch(&self, fragment: String) -> SharedFetch {
        let shared = Arc::clone(&self.shared);
        async move {
            debug!("fetching dictionary data for '{}'", fragment);
            let outcome = match shared.provider.fetch(&fragment).await {
                Ok(data) => Ok(CacheEntry::Found(data.normalized())),
                Err(FetchError::NotFound) => Ok(CacheEntry::NotFound),
                Err(err) => {
                    warn!("dictionary fetch for '{}' failed: {}", fragment, err);
                    Err(err)
                }
            };
            // Finalize under the lock: every exit path clears the flight
            // and only resolved outcomes are cached.
            let mut state = shared.state.lock().expect("cache state poisoned");
            state.pending.remove(&fragment);
            shared.in_flight.fetch_sub(1, Ordering::SeqCst);
            if let Ok(entry) = &outcome {
                state.entries.insert(fragment, entry.clone());
            }
            outcome
        }
        .boxed()
        .shared()
    }

    /// Non-blocking view of a resolved entry
    pub fn peek(&self, fragment: &str) -> Option<CacheEntry> {
        let state = self.shared.state.lock().expect("cache state poisoned");
        state.entries.get(fragment).cloned()
    }

    /// Whether a fetch for `fragment` is currently in flight
    pub fn is_pending(&self, fragment: &str) -> bool {
        let state = self.shared.state.lock().expect("cache state poisoned");
        state.pending.contains_key(fragment)
    }

    /// Whether any fetch is currently in flight
    pub fn is_fetching(&self) -> bool {
        self.shared.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Number of resolved entries
    pub fn len(&self) -> usize {
        let state = self.shared.state.lock().expect("cache state poisoned");
        state.entries.len()
    }

    /// Whether no entries have resolved yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Definition, WordData};
    use async_trait::async_trait;
    use tokio::sync::Semaphore;

    /// Provider that blocks each fetch until the test releases a permit
    struct GatedProvider {
        calls: AtomicUsize,
        gate: Semaphore,
    }

    impl GatedProvider {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                gate: Semaphore::new(0),
            }
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
                definitions: vec![Definition::new("noun", format!("meaning of {}", word))],
                synonyms: vec![format!("{}-ish", word)],
            })
        }
    }

    /// Provider whose first call fails, later calls succeed
    struct FlakyProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DictionaryProvider for FlakyProvider {
        async fn fetch(&self, _word: &str) -> Result<WordData, FetchError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(FetchError::Transient("connection reset".to_string()))
            } else {
                Ok(WordData::default())
            }
        }
    }

    struct MissingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DictionaryProvider for MissingProvider {
        async fn fetch(&self, _word: &str) -> Result<WordData, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(FetchError::NotFound)
        }
    }

    #[tokio::test]
    async fn test_concurrent_gets_share_one_fetch() {
        let provider = Arc::new(GatedProvider::new());
        let cache = FragmentDataCache::new(provider.clone());

        let c1 = cache.clone();
        let c2 = cache.clone();
        let t1 = tokio::spawn(async move { c1.get("anagram").await });
        let t2 = tokio::spawn(async move { c2.get("anagram").await });

        // Let both tasks reach the provider gate.
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
        assert_eq!(provider.calls(), 1, "second caller must join the flight");
        assert!(cache.is_fetching());

        provider.release();
        let r1 = t1.await.unwrap().unwrap();
        let r2 = t2.await.unwrap().unwrap();
        assert_eq!(r1, r2);
        assert_eq!(provider.calls(), 1);
        assert!(!cache.is_fetching());
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_resolved_entry_is_never_refetched() {
        let provider = Arc::new(GatedProvider::new());
        provider.release();
        let cache = FragmentDataCache::new(provider.clone());

        let first = cache.get("cat").await.unwrap();
        let second = cache.get("cat").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_not_found_sentinel_is_cached() {
        let provider = Arc::new(MissingProvider {
            calls: AtomicUsize::new(0),
        });
        let cache = FragmentDataCache::new(provider.clone());

        assert_eq!(cache.get("qzv").await.unwrap(), CacheEntry::NotFound);
        assert_eq!(cache.get("qzv").await.unwrap(), CacheEntry::NotFound);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transient_failure_is_retryable() {
        let provider = Arc::new(FlakyProvider {
            calls: AtomicUsize::new(0),
        });
        let cache = FragmentDataCache::new(provider.clone());

        let first = cache.get("cat").await;
        assert!(matches!(first, Err(FetchError::Transient(_))));
        assert!(cache.peek("cat").is_none(), "failures must not be cached");
        assert!(!cache.is_fetching(), "flag must clear on the error path");

        let second = cache.get("cat").await.unwrap();
        assert_eq!(second, CacheEntry::Found(WordData::default()));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_peek_and_pending() {
        let provider = Arc::new(GatedProvider::new());
        let cache = FragmentDataCache::new(provider.clone());
        assert!(cache.peek("cat").is_none());
        assert!(!cache.is_pending("cat"));

        let c = cache.clone();
        let task = tokio::spawn(async move { c.get("cat").await });
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
        assert!(cache.is_pending("cat"));
        assert!(cache.peek("cat").is_none());

        provider.release();
        task.await.unwrap().unwrap();
        assert!(!cache.is_pending("cat"));
        assert!(cache.peek("cat").is_some());
    }
}
