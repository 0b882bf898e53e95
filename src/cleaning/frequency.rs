//! Word-frequency scoring
//!
//! Dictionary filtering needs a corpus statistic the crate does not ship.
//! Implementations supply one; the pipeline only compares scores against a
//! threshold, so any scale works as long as the threshold matches it. The
//! reference tables use the Zipf scale, where common words sit above 3.0.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{ExtractError, Result};

/// Source of word-frequency scores
///
/// Words unknown to the source score `0.0`.
pub trait WordFrequency: Send + Sync {
    /// Frequency score for a single word
    fn score(&self, word: &str) -> f64;
}

impl<F> WordFrequency for F
where
    F: Fn(&str) -> f64 + Send + Sync,
{
    fn score(&self, word: &str) -> f64 {
        self(word)
    }
}

/// Frequency source that knows no words
///
/// Every word scores `0.0`. Use when dictionary filtering is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLexicon;

impl WordFrequency for NullLexicon {
    fn score(&self, _word: &str) -> f64 {
        0.0
    }
}

/// In-memory word-to-score table
///
/// Lookups are case-insensitive; keys are lowercased on load.
#[derive(Debug, Clone, Default)]
pub struct TableLexicon {
    scores: HashMap<String, f64>,
}

impl TableLexicon {
    /// Build from word/score pairs
    pub fn new(entries: impl IntoIterator<Item = (String, f64)>) -> Self {
        let scores = entries
            .into_iter()
            .map(|(word, score)| (word.to_lowercase(), score))
            .collect();
        Self { scores }
    }

    /// Load a JSON object of word -> score from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let scores: HashMap<String, f64> = serde_json::from_str(&data)
            .map_err(|e| ExtractError::FrequencyTable(format!("{}: {}", path.display(), e)))?;
        Ok(Self::new(scores))
    }

    /// Number of known words
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl WordFrequency for TableLexicon {
    fn score(&self, word: &str) -> f64 {
        self.scores.get(&word.to_lowercase()).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_table_lookup_is_case_insensitive() {
        let lexicon = TableLexicon::new([("Hello".to_string(), 5.3)]);

        assert_eq!(lexicon.score("hello"), 5.3);
        assert_eq!(lexicon.score("HELLO"), 5.3);
        assert_eq!(lexicon.len(), 1);
    }

    #[test]
    fn test_unknown_word_scores_zero() {
        let lexicon = TableLexicon::new([("the".to_string(), 6.7)]);
        assert_eq!(lexicon.score("xqzplok"), 0.0);
    }

    #[test]
    fn test_null_lexicon() {
        assert_eq!(NullLexicon.score("anything"), 0.0);
    }

    #[test]
    fn test_closure_as_lexicon() {
        let lexicon = |word: &str| if word == "the" { 6.7 } else { 0.0 };
        let dynamic: &dyn WordFrequency = &lexicon;

        assert_eq!(dynamic.score("the"), 6.7);
        assert_eq!(dynamic.score("rare"), 0.0);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"The\": 6.7, \"quick\": 4.5}}").unwrap();

        let lexicon = TableLexicon::from_json_file(file.path()).unwrap();
        assert_eq!(lexicon.score("the"), 6.7);
        assert_eq!(lexicon.score("QUICK"), 4.5);
        assert_eq!(lexicon.score("fox"), 0.0);
    }

    #[test]
    fn test_from_json_file_bad_shape() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();

        let err = TableLexicon::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ExtractError::FrequencyTable(_)));
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = TableLexicon::from_json_file("/nonexistent/words.json").unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
