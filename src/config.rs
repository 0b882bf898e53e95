//! Environment-based configuration
//!
//! Every knob has a default, so an empty environment gives a working
//! pipeline: span granularity, cleaning off, 32 cached layouts for 5 minutes.

use std::env;
use std::time::Duration;

use crate::chunks::{ChunkOptions, Granularity};
use crate::cleaning::{OutlierPolicy, TextExtractionSettings};
use crate::error::Result;
use crate::extract::CacheSettings;

/// Runtime configuration for the chunking pipeline
#[derive(Debug, Clone, Default)]
pub struct ExtractorConfig {
    pub granularity: Granularity,
    pub cleaning: CleaningConfig,
    pub cache: CacheSettings,
    /// Optional JSON word-frequency table for dictionary filtering
    pub frequency_table_path: Option<String>,
}

/// Word-filtering configuration
#[derive(Debug, Clone, Default)]
pub struct CleaningConfig {
    /// Apply word filtering at all; off passes span text through untouched
    pub enabled: bool,
    pub filter_by_dictionary_frequency: bool,
    pub min_word_length: usize,
    pub min_dictionary_frequency: f64,
    pub require_alphabetic: bool,
    /// Drop height-outlier spans from noisy lines
    pub drop_outlier_spans: bool,
}

impl ExtractorConfig {
    /// Load from environment variables
    ///
    /// Absent variables fall back to their defaults. A `CHUNK_GRANULARITY`
    /// value that names no known granularity is an error, not a silent
    /// default.
    pub fn from_env() -> Result<Self> {
        let granularity = match env::var("CHUNK_GRANULARITY") {
            Ok(value) => value.parse()?,
            Err(_) => Granularity::Span,
        };

        Ok(Self {
            granularity,
            cleaning: CleaningConfig {
                enabled: env_flag("CHUNK_CLEAN_TEXT"),
                filter_by_dictionary_frequency: env_flag("CHUNK_FILTER_BY_DICTIONARY_FREQUENCY"),
                min_word_length: env::var("CHUNK_MIN_WORD_LENGTH")
                    .unwrap_or_else(|_| "0".to_string())
                    .parse()
                    .unwrap_or(0),
                min_dictionary_frequency: env::var("CHUNK_MIN_DICTIONARY_FREQUENCY")
                    .unwrap_or_else(|_| "0".to_string())
                    .parse()
                    .unwrap_or(0.0),
                require_alphabetic: env_flag("CHUNK_REQUIRE_ALPHABETIC"),
                drop_outlier_spans: env_flag("CHUNK_DROP_OUTLIER_SPANS"),
            },
            cache: CacheSettings {
                capacity: env::var("CACHE_CAPACITY")
                    .unwrap_or_else(|_| "32".to_string())
                    .parse()
                    .unwrap_or(32),
                ttl: Duration::from_secs(
                    env::var("CACHE_TTL_SECS")
                        .unwrap_or_else(|_| "300".to_string())
                        .parse()
                        .unwrap_or(300),
                ),
            },
            frequency_table_path: env::var("FREQUENCY_TABLE_PATH").ok(),
        })
    }

    /// Chunk options implied by this configuration
    pub fn chunk_options(&self) -> ChunkOptions {
        ChunkOptions {
            granularity: self.granularity,
            settings: self.cleaning.enabled.then(|| TextExtractionSettings {
                filter_by_dictionary_frequency: self.cleaning.filter_by_dictionary_frequency,
                min_word_length: self.cleaning.min_word_length,
                min_dictionary_frequency: self.cleaning.min_dictionary_frequency,
                require_alphabetic: self.cleaning.require_alphabetic,
            }),
            drop_outlier_spans: self.cleaning.drop_outlier_spans,
            outliers: OutlierPolicy::default(),
        }
    }
}

fn env_flag(name: &str) -> bool {
    match env::var(name) {
        Ok(value) => matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => false,
    }
}
