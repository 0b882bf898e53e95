//! Upstream layout parsing
//!
//! Converts the extraction engine's JSON page records into the typed
//! hierarchy. Parsing is strict about shape (missing geometry or text fails)
//! and permissive about values: inverted boxes are kept as supplied and
//! logged, never repaired. Extra fields in the records (font data, writing
//! direction) are ignored.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ExtractError, Result};
use crate::geometry::BoundingBox;

use super::types::{Block, Line, Page, Span};

/// Raw page record as emitted by the engine's structured-text dump
#[derive(Debug, Deserialize)]
struct RawPage {
    height: f64,
    width: f64,
    blocks: Vec<RawBlock>,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    bbox: [f64; 4],
    number: u32,
    lines: Vec<RawLine>,
}

#[derive(Debug, Deserialize)]
struct RawLine {
    bbox: [f64; 4],
    spans: Vec<RawSpan>,
}

#[derive(Debug, Deserialize)]
struct RawSpan {
    bbox: [f64; 4],
    text: String,
}

/// Parse one page record, assigning the given 1-based page number
pub fn parse_page(value: &Value, page_number: u32) -> Result<Page> {
    let raw = RawPage::deserialize(value)
        .map_err(|e| ExtractError::MalformedStructure(format!("page {}: {}", page_number, e)))?;
    Ok(build_page(raw, page_number))
}

/// Parse an ordered sequence of page records, numbering pages from 1
pub fn parse_pages(values: &[Value]) -> Result<Vec<Page>> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| parse_page(value, i as u32 + 1))
        .collect()
}

/// Parse a whole snapshot: a JSON array of page records
pub fn pages_from_json(json: &str) -> Result<Vec<Page>> {
    let values: Vec<Value> = serde_json::from_str(json)
        .map_err(|e| ExtractError::MalformedStructure(format!("snapshot: {}", e)))?;
    parse_pages(&values)
}

// ============================================================================
// Helper functions
// ============================================================================

fn build_page(raw: RawPage, page_number: u32) -> Page {
    Page {
        height: raw.height,
        width: raw.width,
        page_number,
        blocks: raw
            .blocks
            .into_iter()
            .map(|block| build_block(block, page_number))
            .collect(),
    }
}

fn build_block(raw: RawBlock, page_number: u32) -> Block {
    Block {
        bounding_box: checked_box(raw.bbox, page_number),
        index: raw.number,
        lines: raw
            .lines
            .into_iter()
            .map(|line| build_line(line, page_number))
            .collect(),
    }
}

fn build_line(raw: RawLine, page_number: u32) -> Line {
    Line {
        bounding_box: checked_box(raw.bbox, page_number),
        spans: raw
            .spans
            .into_iter()
            .map(|span| build_span(span, page_number))
            .collect(),
    }
}

fn build_span(raw: RawSpan, page_number: u32) -> Span {
    Span {
        bounding_box: checked_box(raw.bbox, page_number),
        text: raw.text,
    }
}

fn checked_box(bbox: [f64; 4], page_number: u32) -> BoundingBox {
    let bounds = BoundingBox::from_corners(bbox[0], bbox[1], bbox[2], bbox[3]);
    if !bounds.is_well_formed() {
        tracing::warn!(
            page = page_number,
            width = bounds.width(),
            height = bounds.height(),
            "Bounding box has negative dimensions"
        );
    }
    bounds
}
