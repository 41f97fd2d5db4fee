//! Aggregate Analysis Module
//! Computes descriptive price statistics over the cleaned listings table.

use polars::prelude::*;
use std::fmt;
use thiserror::Error;

use super::group::{group_stats, max_by_metric, min_by_metric, rank_desc, GroupStat};

/// Default number of (year, brand) groups reported by the yearly ranking.
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("No rows to analyze")]
    NoData,
}

/// One entry of the yearly ranking: mean price for a (year, brand) group.
#[derive(Debug, Clone, PartialEq)]
pub struct YearBrandAvg {
    pub year: i64,
    pub brand: String,
    pub avg_price: f64,
}

/// A single named metric: either a descriptive sentence or a ranked
/// sequence of (year, brand) averages.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Text(String),
    Ranking(Vec<YearBrandAvg>),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Text(text) => f.write_str(text),
            MetricValue::Ranking(entries) => {
                let parts: Vec<String> = entries
                    .iter()
                    .map(|e| format!("({}, {}) {:.2}", e.year, e.brand, e.avg_price))
                    .collect();
                f.write_str(&parts.join("; "))
            }
        }
    }
}

/// Ordered metric-name to value mapping produced by the analysis.
#[derive(Debug, Clone, Default)]
pub struct AnalysisResults {
    entries: Vec<(String, MetricValue)>,
}

impl AnalysisResults {
    fn insert(&mut self, key: &str, value: MetricValue) {
        debug_assert!(
            self.get(key).is_none(),
            "duplicate metric key: {key}"
        );
        self.entries.push((key.to_string(), value));
    }

    pub fn get(&self, key: &str) -> Option<&MetricValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge another result set into this one. Key sets are expected to be
    /// disjoint.
    fn merge(&mut self, other: AnalysisResults) {
        for (key, value) in other.entries {
            self.insert(&key, value);
        }
    }
}

/// Performs statistical summaries and aggregations over a cleaned table.
pub struct Analyzer;

impl Analyzer {
    /// Highest/lowest average price and widest price span by brand.
    ///
    /// Ties on any statistic go to the brand encountered first in row order.
    pub fn brand_price_stats(df: &DataFrame) -> Result<AnalysisResults, AnalysisError> {
        let pairs = Self::brand_price_pairs(df)?;
        let stats = group_stats(pairs);
        if stats.is_empty() {
            return Err(AnalysisError::NoData);
        }

        // All three winners are scanned over the same first-seen-ordered
        // stats, so each tie falls to the brand seen first in row order.
        let highest = max_by_metric(&stats, GroupStat::mean)
            .map(|s| s.key.clone())
            .unwrap_or_default();
        let lowest = min_by_metric(&stats, GroupStat::mean)
            .map(|s| s.key.clone())
            .unwrap_or_default();
        let widest = max_by_metric(&stats, GroupStat::span)
            .map(|s| s.key.clone())
            .unwrap_or_default();

        let mut results = AnalysisResults::default();
        results.insert(
            "highest_avg_brand",
            MetricValue::Text(format!("{highest} has the highest average price")),
        );
        results.insert(
            "lowest_avg_brand",
            MetricValue::Text(format!("{lowest} has the lowest average price")),
        );
        results.insert(
            "widest_range_brand",
            MetricValue::Text(format!("{widest} has the widest price range")),
        );
        Ok(results)
    }

    /// Mean price per (year, brand) group, ranked descending. Reports the
    /// top group as a sentence and the first `top_n` groups as a ranking.
    pub fn yearly_brand_analysis(
        df: &DataFrame,
        top_n: usize,
    ) -> Result<AnalysisResults, AnalysisError> {
        let pairs = Self::year_brand_price_triples(df)?;
        let mut stats = group_stats(pairs);
        if stats.is_empty() {
            return Err(AnalysisError::NoData);
        }

        rank_desc(&mut stats, GroupStat::mean);

        let (top_year, top_brand) = stats[0].key.clone();
        let top_value = stats[0].mean();

        let ranking: Vec<YearBrandAvg> = stats
            .iter()
            .take(top_n)
            .map(|s| YearBrandAvg {
                year: s.key.0,
                brand: s.key.1.clone(),
                avg_price: s.mean(),
            })
            .collect();

        let mut results = AnalysisResults::default();
        results.insert(
            "highest_year_brand",
            MetricValue::Text(format!(
                "In {top_year}, {top_brand} had the highest average price: {top_value:.2}"
            )),
        );
        results.insert("top_n_year_brand", MetricValue::Ranking(ranking));
        Ok(results)
    }

    /// Run both analyses and merge their disjoint result mappings.
    pub fn run_analysis(df: &DataFrame) -> Result<AnalysisResults, AnalysisError> {
        let mut results = Self::brand_price_stats(df)?;
        results.merge(Self::yearly_brand_analysis(df, DEFAULT_TOP_N)?);
        Ok(results)
    }

    fn brand_price_pairs(df: &DataFrame) -> Result<Vec<(String, f64)>, AnalysisError> {
        let brand = Self::str_column(df, "brand")?;
        let price = Self::f64_column(df, "price")?;
        let brand = brand.str()?;
        let price = price.f64()?;

        Ok((0..df.height())
            .filter_map(|i| Some((brand.get(i)?.to_string(), price.get(i)?)))
            .collect())
    }

    fn year_brand_price_triples(
        df: &DataFrame,
    ) -> Result<Vec<((i64, String), f64)>, AnalysisError> {
        let year = Self::column(df, "yearOfRegistration")?.cast(&DataType::Int64)?;
        let brand = Self::str_column(df, "brand")?;
        let price = Self::f64_column(df, "price")?;
        let year = year.i64()?;
        let brand = brand.str()?;
        let price = price.f64()?;

        Ok((0..df.height())
            .filter_map(|i| Some(((year.get(i)?, brand.get(i)?.to_string()), price.get(i)?)))
            .collect())
    }

    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, AnalysisError> {
        df.column(name)
            .map_err(|_| AnalysisError::MissingColumn(name.to_string()))
    }

    fn str_column(df: &DataFrame, name: &str) -> Result<Column, AnalysisError> {
        Ok(Self::column(df, name)?.cast(&DataType::String)?)
    }

    fn f64_column(df: &DataFrame, name: &str) -> Result<Column, AnalysisError> {
        Ok(Self::column(df, name)?.cast(&DataType::Float64)?)
    }
}
