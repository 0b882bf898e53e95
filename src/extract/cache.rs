//! Extraction result cache
//!
//! Page layouts are expensive to produce (the page source may drive a
//! rendering engine or an OCR pass), so results are memoized per source
//! identifier with three bounds:
//!
//! - capacity: least-recently-used eviction past `capacity` entries
//! - time: one generation clock for the whole cache; the first lookup at or
//!   past the TTL flushes every entry and starts a new generation
//! - concurrency: lookups for the same key share a single in-flight
//!   computation, so a source is never asked twice concurrently for one key
//!
//! Failures are handed to every waiting caller and never stored; the next
//! lookup retries. A flight whose leading task is dropped mid-load is
//! reclaimed the same way: waiters on the dead flight get an error, and the
//! next lookup for the key leads a fresh computation.
//!
//! # Locking
//!
//! Bookkeeping lives behind a `parking_lot::Mutex` that is only ever held for
//! map operations, never across an `.await`.

use std::collections::HashMap;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::{Duration, Instant};

use crate::error::{ExtractError, Result};
use crate::layout::Page;

/// Cache bounds
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Maximum number of cached layouts
    pub capacity: usize,
    /// Generation lifetime; the whole cache flushes once this elapses
    pub ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            capacity: 32,
            ttl: Duration::from_secs(300),
        }
    }
}

type CachedPages = Arc<Vec<Page>>;
type FlightResult = Result<CachedPages>;
type FlightReceiver = watch::Receiver<Option<FlightResult>>;

/// LRU + TTL layout cache with per-key request coalescing
pub struct ExtractionCache {
    state: Mutex<CacheState>,
    ttl: Duration,
}

struct CacheState {
    entries: LruCache<String, CachedPages>,
    inflight: HashMap<String, FlightReceiver>,
    generation: u64,
    generation_started: Instant,
}

enum Lookup {
    Hit(CachedPages),
    Wait(FlightReceiver),
    Miss {
        tx: watch::Sender<Option<FlightResult>>,
        generation: u64,
    },
}

impl ExtractionCache {
    /// Create a cache with the given bounds
    pub fn new(settings: CacheSettings) -> Self {
        let capacity =
            NonZeroUsize::new(settings.capacity).unwrap_or(NonZeroUsize::new(32).unwrap());
        Self {
            state: Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                inflight: HashMap::new(),
                generation: 0,
                generation_started: Instant::now(),
            }),
            ttl: settings.ttl,
        }
    }

    /// Look up `key`, computing it with `load` on a miss
    ///
    /// Concurrent calls for the same key share one `load` invocation and all
    /// receive its result. Errors propagate to every caller and are not
    /// retained. If the leading call is dropped before `load` resolves, the
    /// next lookup for the key starts over.
    pub async fn get_or_load<F, Fut>(&self, key: &str, load: F) -> FlightResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Page>>>,
    {
        match self.lookup(key) {
            Lookup::Hit(pages) => Ok(pages),
            Lookup::Wait(rx) => Self::wait_for_result(rx).await,
            Lookup::Miss { tx, generation } => {
                let result = load().await.map(Arc::new);
                self.finish_flight(key, generation, &result);
                // Waiters read the channel, so a send failure (no receivers
                // left) is fine to ignore.
                let _ = tx.send(Some(result.clone()));
                result
            }
        }
    }

    /// Number of cached layouts
    ///
    /// Counts the current generation's entries; expiry runs on lookups, not
    /// here.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    /// Remove one cached layout
    pub fn remove(&self, key: &str) {
        self.state.lock().entries.pop(key);
    }

    /// Drop every cached layout and start a new generation
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.generation += 1;
        state.generation_started = Instant::now();
    }

    // ========================================================================
    // Bookkeeping
    // ========================================================================

    fn lookup(&self, key: &str) -> Lookup {
        let mut state = self.state.lock();
        self.flush_if_expired(&mut state);

        if let Some(pages) = state.entries.get(key) {
            tracing::debug!(key = %key, "Layout cache hit");
            return Lookup::Hit(pages.clone());
        }
        if let Some(rx) = state.inflight.get(key) {
            // A closed channel that never carried a result means the leading
            // task was dropped mid-load; fall through and lead a fresh
            // flight in its place.
            if rx.has_changed().is_ok() || rx.borrow().is_some() {
                tracing::debug!(key = %key, "Joining in-flight extraction");
                return Lookup::Wait(rx.clone());
            }
            tracing::debug!(key = %key, "Reclaiming abandoned extraction flight");
        }

        let (tx, rx) = watch::channel(None);
        state.inflight.insert(key.to_string(), rx);
        Lookup::Miss {
            tx,
            generation: state.generation,
        }
    }

    fn flush_if_expired(&self, state: &mut CacheState) {
        if state.generation_started.elapsed() < self.ttl {
            return;
        }
        let dropped = state.entries.len();
        state.entries.clear();
        state.generation += 1;
        state.generation_started = Instant::now();
        if dropped > 0 {
            tracing::debug!(
                dropped,
                generation = state.generation,
                "Layout cache generation expired"
            );
        }
    }

    fn finish_flight(&self, key: &str, generation: u64, result: &FlightResult) {
        let mut state = self.state.lock();
        state.inflight.remove(key);
        if let Ok(pages) = result {
            // A flight that started before a flush must not repopulate the
            // new generation; its waiters still get the result.
            if state.generation == generation {
                state.entries.put(key.to_string(), pages.clone());
            }
        }
    }

    async fn wait_for_result(mut rx: FlightReceiver) -> FlightResult {
        loop {
            let current = rx.borrow().clone();
            if let Some(result) = current {
                return result;
            }
            if rx.changed().await.is_err() {
                // Sender gone: either the result was published right before
                // the drop, or the leader was cancelled.
                let current = rx.borrow().clone();
                return match current {
                    Some(result) => result,
                    None => Err(ExtractError::Source(
                        "extraction task dropped before producing a result".to_string(),
                    )),
                };
            }
        }
    }
}

impl Default for ExtractionCache {
    fn default() -> Self {
        Self::new(CacheSettings::default())
    }
}
