//! Subraya
//!
//! Turns page-structured text layouts (blocks, lines, and spans, each with a
//! bounding box) into highlight-ready text chunks. Producing the layout is
//! the job of an external engine behind the [`PageSource`] trait; this crate
//! owns everything after that point: the typed hierarchy, the cleaning
//! policy, chunk aggregation at a chosen granularity, and the extraction
//! cache.
//!
//! # Modules
//!
//! - `geometry`: page-space boxes
//! - `layout`: the page/block/line/span hierarchy and snapshot parsing
//! - `cleaning`: word filtering and span-outlier rejection
//! - `chunks`: chunk aggregation and the output envelope
//! - `extract`: the cached extraction facade
//! - `config`: environment-based configuration

pub mod chunks;
pub mod cleaning;
pub mod config;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod layout;

pub use chunks::{build_chunks, ChunkOptions, ExtractionOutput, Granularity, TextChunk};
pub use cleaning::{
    clean_text, NullLexicon, OutlierPolicy, TableLexicon, TextExtractionSettings, WordFrequency,
};
pub use config::{CleaningConfig, ExtractorConfig};
pub use error::{ExtractError, Result};
pub use extract::{CacheSettings, ExtractionCache, Extractor, PageSource, SnapshotSource};
pub use geometry::{BoundingBox, Coordinates};
pub use layout::{pages_from_json, parse_page, parse_pages, Block, Line, Page, Span};
