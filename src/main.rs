//! Subraya CLI
//!
//! Reads a structured-text snapshot (a JSON array of page records) and builds
//! text chunks per the environment configuration. The chunk envelope is
//! written as JSON to a file or stdout.

use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use subraya::{
    build_chunks, pages_from_json, ExtractionOutput, Extractor, ExtractorConfig, NullLexicon,
    SnapshotSource, TableLexicon, WordFrequency,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subraya=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config =
        ExtractorConfig::from_env().context("reading configuration from the environment")?;

    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .context("usage: subraya <snapshot.json | -> [output.json]")?;
    let output = args.next();

    let lexicon: Arc<dyn WordFrequency> = match &config.frequency_table_path {
        Some(path) => {
            let table = TableLexicon::from_json_file(path)
                .with_context(|| format!("loading frequency table {}", path))?;
            tracing::info!(words = table.len(), path = %path, "Loaded frequency table");
            Arc::new(table)
        }
        None => Arc::new(NullLexicon),
    };

    let options = config.chunk_options();
    if options
        .settings
        .as_ref()
        .map_or(false, |s| s.filter_by_dictionary_frequency)
        && config.frequency_table_path.is_none()
    {
        tracing::warn!(
            "Dictionary filtering is enabled without FREQUENCY_TABLE_PATH; every word scores 0.0"
        );
    }

    let chunks = if input == "-" {
        let mut data = String::new();
        std::io::stdin()
            .read_to_string(&mut data)
            .context("reading snapshot from stdin")?;
        let pages = pages_from_json(&data)?;
        build_chunks(&pages, &options, lexicon.as_ref())
    } else {
        let extractor = Extractor::with_settings(Arc::new(SnapshotSource), config.cache.clone())
            .with_lexicon(lexicon);
        extractor.chunks(&input, &options).await?
    };

    tracing::info!(chunks = chunks.len(), "Extraction complete");

    let envelope = ExtractionOutput { text_chunks: chunks };
    let json = serde_json::to_string_pretty(&envelope)?;
    match output {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("writing {}", path))?
        }
        None => println!("{}", json),
    }

    Ok(())
}
