//! Auto Insight - used-vehicle listings analysis pipeline
//!
//! Loads a CSV of used-vehicle listings, cleans malformed numeric fields,
//! filters implausible records, computes aggregate price statistics, and
//! exports the cleaned table plus the statistics to CSV files.

mod data;
mod export;
mod stats;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use data::{DataCleaner, DataLoader, DEFAULT_ENCODING};
use stats::Analyzer;

const INPUT_FILE: &str = "autos.csv";
const CLEANED_FILE: &str = "auto_cleaned.csv";
const ANALYSIS_FILE: &str = "auto_analysis.csv";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let df = DataLoader::load_csv(INPUT_FILE, DEFAULT_ENCODING)
        .with_context(|| format!("loading {INPUT_FILE}"))?;
    info!(rows = df.height(), "loaded input data");

    let df = DataCleaner::clean(df).context("cleaning data")?;

    let results = Analyzer::run_analysis(&df).context("running analysis")?;

    export::export_cleaned_data(&df, CLEANED_FILE)
        .with_context(|| format!("exporting {CLEANED_FILE}"))?;
    export::export_analysis_results(&results, ANALYSIS_FILE)
        .with_context(|| format!("exporting {ANALYSIS_FILE}"))?;

    for (key, value) in results.iter() {
        println!("\n{key}:\n{value}");
    }

    Ok(())
}
