//! Statistics module - grouping primitives and aggregate analysis

mod analyzer;
mod group;

pub use analyzer::{AnalysisResults, Analyzer};
