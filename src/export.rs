//! Export Module
//! Serializes the cleaned table and the analysis results to CSV files.

use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::stats::AnalysisResults;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Write the cleaned table as CSV with a header row and no index column,
/// in a format the loader reads back unchanged.
pub fn export_cleaned_data(df: &DataFrame, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let mut df = df.clone();
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;

    info!(path = %path.display(), rows = df.height(), "exported cleaned data");
    Ok(())
}

/// Write the analysis results as a single-row CSV. Column names are the
/// metric keys in insertion order; the ranking metric is flattened into
/// one cell, scalar sentences are written as-is.
pub fn export_analysis_results(
    results: &AnalysisResults,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let columns: Vec<Column> = results
        .iter()
        .map(|(key, value)| Column::new(key.into(), vec![value.to_string()]))
        .collect();
    let mut df = DataFrame::new(columns)?;

    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;

    info!(path = %path.display(), "exported analysis results");
    Ok(())
}
