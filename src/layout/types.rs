//! Hierarchical page layout model
//!
//! Pages own blocks, blocks own lines, lines own spans. The hierarchy is
//! built once from an upstream layout snapshot and never mutated; every level
//! keeps the bounding box the engine reported for it.

use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;

/// Smallest unit of positioned text (a run of uniform styling)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Region the text occupies on the page
    pub bounding_box: BoundingBox,
    /// Raw text as reported by the engine
    pub text: String,
}

impl Span {
    pub fn new(bounding_box: BoundingBox, text: impl Into<String>) -> Self {
        Self {
            bounding_box,
            text: text.into(),
        }
    }

    /// Height of the span's box
    pub fn height(&self) -> f64 {
        self.bounding_box.height()
    }
}

/// A line of text: spans in reading order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub bounding_box: BoundingBox,
    pub spans: Vec<Span>,
}

impl Line {
    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    /// Coefficient of variation of span heights
    ///
    /// Population standard deviation divided by the mean. Returns `0.0` for
    /// lines with fewer than two spans or a zero mean height.
    pub fn height_variation(&self) -> f64 {
        if self.spans.len() < 2 {
            return 0.0;
        }
        let n = self.spans.len() as f64;
        let mean = self.spans.iter().map(Span::height).sum::<f64>() / n;
        if mean == 0.0 {
            return 0.0;
        }
        let variance = self
            .spans
            .iter()
            .map(|span| {
                let delta = span.height() - mean;
                delta * delta
            })
            .sum::<f64>()
            / n;
        variance.sqrt() / mean
    }

    /// Modal span height, the first-encountered value winning ties
    ///
    /// Heights compare by exact equality: spans set at the same text size
    /// repeat the same box height bit-for-bit. `None` for an empty line.
    pub fn most_common_span_height(&self) -> Option<f64> {
        let mut counts: Vec<(f64, usize)> = Vec::new();
        for span in &self.spans {
            let height = span.height();
            match counts.iter_mut().find(|(value, _)| *value == height) {
                Some((_, count)) => *count += 1,
                None => counts.push((height, 1)),
            }
        }

        let mut best: Option<(f64, usize)> = None;
        for &(height, count) in &counts {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((height, count));
            }
        }
        best.map(|(height, _)| height)
    }
}

/// A block of text: lines in reading order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub bounding_box: BoundingBox,
    /// Engine-assigned block index, kept for traceability only
    pub index: u32,
    pub lines: Vec<Line>,
}

/// One page of the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page height in page units
    pub height: f64,
    /// Page width in page units
    pub width: f64,
    /// 1-based page number
    pub page_number: u32,
    pub blocks: Vec<Block>,
}
