//! Span-outlier rejection
//!
//! Scanned or OCR-derived layouts sometimes attach stray fragments (page
//! furniture, specks promoted to text) to an otherwise uniform line. When
//! span heights vary enough, spans far from the line's modal height are
//! dropped before chunks are built.

use crate::layout::{Line, Span};

/// Thresholds for span-outlier rejection
#[derive(Debug, Clone, Copy)]
pub struct OutlierPolicy {
    /// Height coefficient of variation above which rejection kicks in
    pub variation_threshold: f64,
    /// Allowed deviation from the modal height, as a fraction of it
    pub height_tolerance: f64,
}

impl Default for OutlierPolicy {
    fn default() -> Self {
        Self {
            variation_threshold: 0.1,
            height_tolerance: 0.05,
        }
    }
}

/// Spans of a line that survive outlier rejection, in reading order
///
/// Returns every span when heights are uniform enough (variation at or below
/// the threshold). Otherwise keeps only spans whose height sits within
/// `height_tolerance` of the modal height.
pub fn retained_spans<'a>(line: &'a Line, policy: &OutlierPolicy) -> Vec<&'a Span> {
    if line.height_variation() <= policy.variation_threshold {
        return line.spans.iter().collect();
    }
    let Some(reference) = line.most_common_span_height() else {
        return line.spans.iter().collect();
    };

    let tolerance = policy.height_tolerance * reference;
    line.spans
        .iter()
        .filter(|span| (span.height() - reference).abs() <= tolerance)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;

    fn line_with_heights(heights: &[f64]) -> Line {
        Line {
            bounding_box: BoundingBox::from_corners(0.0, 0.0, 100.0, 12.0),
            spans: heights
                .iter()
                .map(|&h| Span::new(BoundingBox::from_corners(0.0, 0.0, 10.0, h), "w"))
                .collect(),
        }
    }

    #[test]
    fn test_uniform_line_retains_all() {
        let line = line_with_heights(&[10.0, 10.0, 10.0]);
        let retained = retained_spans(&line, &OutlierPolicy::default());

        assert_eq!(retained.len(), 3);
    }

    #[test]
    fn test_outlier_dropped() {
        let line = line_with_heights(&[10.0, 10.0, 10.0, 50.0]);
        let retained = retained_spans(&line, &OutlierPolicy::default());

        assert_eq!(retained.len(), 3);
        assert!(retained.iter().all(|span| span.height() == 10.0));
    }

    #[test]
    fn test_near_modal_height_survives() {
        // 10.4 is within 5% of the modal 10.0; 50.0 is not
        let line = line_with_heights(&[10.0, 10.0, 10.4, 50.0]);
        let retained = retained_spans(&line, &OutlierPolicy::default());

        assert_eq!(retained.len(), 3);
    }

    #[test]
    fn test_empty_line_yields_empty_set() {
        let line = line_with_heights(&[]);
        let retained = retained_spans(&line, &OutlierPolicy::default());

        assert!(retained.is_empty());
    }

    #[test]
    fn test_variation_at_threshold_retains_all() {
        // Rejection requires variation strictly above the threshold
        let line = line_with_heights(&[10.0, 10.0, 10.0, 50.0]);
        let policy = OutlierPolicy {
            variation_threshold: line.height_variation(),
            height_tolerance: 0.05,
        };

        assert_eq!(retained_spans(&line, &policy).len(), 4);
    }

    #[test]
    fn test_custom_tolerance() {
        let line = line_with_heights(&[10.0, 10.0, 14.0, 50.0]);
        let policy = OutlierPolicy {
            variation_threshold: 0.1,
            height_tolerance: 0.5,
        };
        let retained = retained_spans(&line, &policy);

        // 14.0 sits within 50% of the modal 10.0; 50.0 still does not
        assert_eq!(retained.len(), 3);
    }
}
