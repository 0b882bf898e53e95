//! Text cleaning heuristics
//!
//! Word-level filtering for noisy extraction output, plus span-outlier
//! rejection. Cleaning runs on span text before chunks are joined, so every
//! filter sees words the way the engine produced them, never across span
//! boundaries.

mod frequency;
mod outliers;

pub use frequency::{NullLexicon, TableLexicon, WordFrequency};
pub use outliers::{retained_spans, OutlierPolicy};

use serde::{Deserialize, Serialize};

/// Word-filtering settings
///
/// The defaults disable every filter. `min_word_length` counts characters,
/// not bytes. `min_dictionary_frequency` compares against the injected
/// [`WordFrequency`] source, so its scale must match the lexicon in use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextExtractionSettings {
    /// Drop words scoring below `min_dictionary_frequency`
    pub filter_by_dictionary_frequency: bool,
    /// Drop words shorter than this many characters
    pub min_word_length: usize,
    /// Score threshold for dictionary filtering
    pub min_dictionary_frequency: f64,
    /// Drop words containing any non-alphabetic character
    pub require_alphabetic: bool,
}

/// Filter the words of `text` per `settings`
///
/// Splits on whitespace and drops words failing any enabled filter.
/// Survivors join with single spaces in their original order, so runs of
/// whitespace collapse even with every filter disabled. Idempotent; empty
/// input is valid and yields an empty string.
pub fn clean_text(
    text: &str,
    settings: &TextExtractionSettings,
    lexicon: &dyn WordFrequency,
) -> String {
    let kept: Vec<&str> = text
        .split_whitespace()
        .filter(|word| keep_word(word, settings, lexicon))
        .collect();
    kept.join(" ")
}

fn keep_word(word: &str, settings: &TextExtractionSettings, lexicon: &dyn WordFrequency) -> bool {
    if settings.require_alphabetic && !word.chars().all(char::is_alphabetic) {
        return false;
    }
    if word.chars().count() < settings.min_word_length {
        return false;
    }
    if settings.filter_by_dictionary_frequency
        && lexicon.score(word) < settings.min_dictionary_frequency
    {
        return false;
    }
    true
}
