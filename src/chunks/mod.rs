//! Chunk aggregation
//!
//! Flattens the page hierarchy into highlight-ready text chunks at a chosen
//! granularity. Span text is cleaned span-by-span before any joining;
//! fragments with no visible characters are skipped and survivors join with
//! single spaces. Chunks that end up blank are dropped. Boxes are inherited
//! verbatim from the hierarchy level a chunk was built from, never recomputed
//! from its survivors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cleaning::{
    clean_text, retained_spans, OutlierPolicy, TextExtractionSettings, WordFrequency,
};
use crate::error::ExtractError;
use crate::geometry::BoundingBox;
use crate::layout::{Line, Page, Span};

/// Hierarchy level chunks are built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One chunk per span: the finest highlight regions
    #[default]
    Span,
    /// One chunk per line
    Line,
    /// One chunk per block
    Block,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Span => "span",
            Granularity::Line => "line",
            Granularity::Block => "block",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ExtractError;

    /// Accepts singular and plural forms, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "span" | "spans" => Ok(Granularity::Span),
            "line" | "lines" => Ok(Granularity::Line),
            "block" | "blocks" => Ok(Granularity::Block),
            _ => Err(ExtractError::InvalidGranularity(s.to_string())),
        }
    }
}

/// Highlight-ready region of text
///
/// Field names are the downstream wire contract. Measures are copied from the
/// source box at build time; a negative width or height means the engine
/// reported an inverted box and it was preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChunk {
    /// 1-based page number the chunk sits on
    pub page_number: u32,
    /// Chunk text, cleaned when settings were supplied
    pub text: String,
    /// Left edge of the highlight region
    pub left: f64,
    /// Bottom edge of the highlight region
    pub bottom: f64,
    /// Region width
    pub width: f64,
    /// Region height
    pub height: f64,
}

impl TextChunk {
    fn from_region(bounds: &BoundingBox, page_number: u32, text: String) -> Self {
        Self {
            page_number,
            text,
            left: bounds.left(),
            bottom: bounds.bottom(),
            width: bounds.width(),
            height: bounds.height(),
        }
    }
}

/// Wire envelope for a chunk extraction response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutput {
    pub text_chunks: Vec<TextChunk>,
}

/// Options for chunk building
#[derive(Debug, Clone, Default)]
pub struct ChunkOptions {
    /// Hierarchy level to emit chunks at
    pub granularity: Granularity,
    /// Word filtering; `None` passes span text through byte-for-byte
    pub settings: Option<TextExtractionSettings>,
    /// Drop spans whose height is an outlier within their line
    pub drop_outlier_spans: bool,
    /// Thresholds for outlier rejection
    pub outliers: OutlierPolicy,
}

/// Build chunks for every page at the options' granularity
///
/// Output order follows the hierarchy exactly: pages in input order, then
/// blocks, lines, and spans as the engine reported them. Never fails on a
/// well-formed hierarchy; pages without text simply contribute no chunks.
pub fn build_chunks(
    pages: &[Page],
    options: &ChunkOptions,
    lexicon: &dyn WordFrequency,
) -> Vec<TextChunk> {
    let mut chunks = Vec::new();

    for page in pages {
        for block in &page.blocks {
            match options.granularity {
                Granularity::Span => {
                    for line in &block.lines {
                        for span in line_spans(line, options) {
                            let text = span_text(span, options, lexicon);
                            if is_blank(&text) {
                                continue;
                            }
                            chunks.push(TextChunk::from_region(
                                &span.bounding_box,
                                page.page_number,
                                text,
                            ));
                        }
                    }
                }
                Granularity::Line => {
                    for line in &block.lines {
                        let text = joined_line_text(line, options, lexicon);
                        if is_blank(&text) {
                            continue;
                        }
                        chunks.push(TextChunk::from_region(
                            &line.bounding_box,
                            page.page_number,
                            text,
                        ));
                    }
                }
                Granularity::Block => {
                    let text = join_fragments(
                        block
                            .lines
                            .iter()
                            .map(|line| joined_line_text(line, options, lexicon)),
                    );
                    if is_blank(&text) {
                        continue;
                    }
                    chunks.push(TextChunk::from_region(
                        &block.bounding_box,
                        page.page_number,
                        text,
                    ));
                }
            }
        }
    }

    tracing::debug!(
        granularity = %options.granularity,
        count = chunks.len(),
        "Built text chunks"
    );
    chunks
}

// ============================================================================
// Helper functions
// ============================================================================

fn line_spans<'a>(line: &'a Line, options: &ChunkOptions) -> Vec<&'a Span> {
    if options.drop_outlier_spans {
        retained_spans(line, &options.outliers)
    } else {
        line.spans.iter().collect()
    }
}

fn span_text(span: &Span, options: &ChunkOptions, lexicon: &dyn WordFrequency) -> String {
    match &options.settings {
        Some(settings) => clean_text(&span.text, settings, lexicon),
        None => span.text.clone(),
    }
}

fn joined_line_text(line: &Line, options: &ChunkOptions, lexicon: &dyn WordFrequency) -> String {
    join_fragments(
        line_spans(line, options)
            .into_iter()
            .map(|span| span_text(span, options, lexicon)),
    )
}

/// Join fragments with single spaces, skipping the blank ones
///
/// Skipping blanks rather than joining them keeps span-level and line-level
/// chunk text equivalent for the same input.
fn join_fragments(fragments: impl IntoIterator<Item = String>) -> String {
    let parts: Vec<String> = fragments.into_iter().filter(|f| !is_blank(f)).collect();
    parts.join(" ")
}

/// True when the text has no character outside {space, tab, CR, LF}
fn is_blank(text: &str) -> bool {
    text.chars().all(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}
