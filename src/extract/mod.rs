//! Cached extraction facade
//!
//! Ties the pipeline together: a [`PageSource`] produces page layouts for a
//! source identifier; the cache memoizes them and chunk building flattens
//! them per request.
//!
//! ```text
//! source_id ──► ExtractionCache ──► PageSource (engine / OCR / snapshot)
//!                     │
//!                     ▼
//!               Arc<Vec<Page>> ──► build_chunks ──► Vec<TextChunk>
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use subraya::{ChunkOptions, Extractor, Granularity, SnapshotSource};
//!
//! let extractor = Extractor::new(Arc::new(SnapshotSource));
//! let chunks = extractor
//!     .chunks("report.textpage.json", &ChunkOptions {
//!         granularity: Granularity::Line,
//!         ..Default::default()
//!     })
//!     .await?;
//! ```

mod cache;

pub use cache::{CacheSettings, ExtractionCache};

use std::sync::Arc;

use async_trait::async_trait;

use crate::chunks::{build_chunks, ChunkOptions, TextChunk};
use crate::cleaning::{NullLexicon, WordFrequency};
use crate::error::Result;
use crate::layout::{pages_from_json, Page};

/// Source of page layouts for a document identifier
///
/// The boundary to whatever actually opens documents: a rendering engine, an
/// OCR pass, a pre-extracted snapshot on disk. Implementations are expected
/// to be expensive; the extractor caches their results.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Produce the full page hierarchy for `source_id`
    async fn load_pages(&self, source_id: &str) -> Result<Vec<Page>>;
}

/// Page source backed by structured-text snapshot files
///
/// `source_id` is a filesystem path to a JSON array of page records, the
/// format the extraction engine dumps.
pub struct SnapshotSource;

#[async_trait]
impl PageSource for SnapshotSource {
    async fn load_pages(&self, source_id: &str) -> Result<Vec<Page>> {
        let data = tokio::fs::read_to_string(source_id).await?;
        pages_from_json(&data)
    }
}

/// Cached chunk extraction over a page source
pub struct Extractor {
    source: Arc<dyn PageSource>,
    cache: ExtractionCache,
    lexicon: Arc<dyn WordFrequency>,
}

impl Extractor {
    /// Create an extractor with default cache bounds and no frequency data
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self::with_settings(source, CacheSettings::default())
    }

    /// Create an extractor with custom cache bounds
    pub fn with_settings(source: Arc<dyn PageSource>, settings: CacheSettings) -> Self {
        Self {
            source,
            cache: ExtractionCache::new(settings),
            lexicon: Arc::new(NullLexicon),
        }
    }

    /// Replace the word-frequency source used by dictionary filtering
    pub fn with_lexicon(mut self, lexicon: Arc<dyn WordFrequency>) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Page layouts for a source, served from cache when possible
    pub async fn pages(&self, source_id: &str) -> Result<Arc<Vec<Page>>> {
        self.cache
            .get_or_load(source_id, || self.source.load_pages(source_id))
            .await
    }

    /// Chunks for a source at the given options
    pub async fn chunks(&self, source_id: &str, options: &ChunkOptions) -> Result<Vec<TextChunk>> {
        let pages = self.pages(source_id).await?;
        let chunks = build_chunks(&pages, options, self.lexicon.as_ref());
        tracing::info!(
            source_id = %source_id,
            pages = pages.len(),
            chunks = chunks.len(),
            granularity = %options.granularity,
            "Extracted chunks"
        );
        Ok(chunks)
    }

    /// Forget one source's cached layout
    pub fn evict(&self, source_id: &str) {
        self.cache.remove(source_id);
    }

    /// Number of cached layouts
    pub fn cached_layouts(&self) -> usize {
        self.cache.len()
    }
}
