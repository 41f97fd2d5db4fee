//! Data Cleaner Module
//! Normalizes currency/unit-formatted columns and drops implausible rows.

use polars::prelude::*;
use thiserror::Error;
use tracing::info;

/// Registration years outside this window are treated as data entry errors.
pub const MIN_YEAR: i64 = 1900;
pub const MAX_YEAR: i64 = 2020;
/// Listing prices outside this window are treated as implausible.
pub const MIN_PRICE: f64 = 500.0;
pub const MAX_PRICE: f64 = 500_000.0;

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Cannot parse {column} value {value:?} as a number")]
    Parse { column: String, value: String },
}

/// Handles cleaning and filtering of the loaded listings table.
pub struct DataCleaner;

impl DataCleaner {
    /// Clean the listings table:
    ///
    /// 1. `price`: strip `$` and `,`, parse as f64
    /// 2. `odometer`: strip `km` and `,`, parse as f64
    /// 3. keep rows with `1900 <= yearOfRegistration <= 2020`
    /// 4. keep rows with `500 <= price <= 500000`
    ///
    /// Any residual non-numeric value in steps 1-2 is a [`CleanError::Parse`].
    /// Surviving rows keep their input order; no other column is touched.
    /// Re-cleaning already-numeric columns is a no-op cast, so `clean` is
    /// idempotent on its own output.
    pub fn clean(mut df: DataFrame) -> Result<DataFrame, CleanError> {
        let before = df.height();

        let price = Self::parse_numeric_column(&df, "price", &["$", ","])?;
        df.replace("price", price)?;

        let odometer = Self::parse_numeric_column(&df, "odometer", &["km", ","])?;
        df.replace("odometer", odometer)?;

        if df.column("yearOfRegistration").is_err() {
            return Err(CleanError::MissingColumn("yearOfRegistration".to_string()));
        }

        // Null year/price compares as null and is filtered out with the
        // out-of-range rows.
        let df = df
            .lazy()
            .filter(
                col("yearOfRegistration")
                    .gt_eq(lit(MIN_YEAR))
                    .and(col("yearOfRegistration").lt_eq(lit(MAX_YEAR))),
            )
            .filter(
                col("price")
                    .gt_eq(lit(MIN_PRICE))
                    .and(col("price").lt_eq(lit(MAX_PRICE))),
            )
            .collect()?;

        info!(
            rows_before = before,
            rows_after = df.height(),
            "dropped implausible rows"
        );
        Ok(df)
    }

    /// Strip the given markers from every value of a text column and parse
    /// the remainder as f64. Columns that are already numeric are cast
    /// directly; nulls pass through as nulls.
    fn parse_numeric_column(
        df: &DataFrame,
        name: &str,
        markers: &[&str],
    ) -> Result<Series, CleanError> {
        let column = df
            .column(name)
            .map_err(|_| CleanError::MissingColumn(name.to_string()))?;

        if matches!(
            column.dtype(),
            DataType::Float32
                | DataType::Float64
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        ) {
            return Ok(column
                .cast(&DataType::Float64)?
                .as_materialized_series()
                .clone());
        }

        let text = column.cast(&DataType::String)?;
        let ca = text.str()?;

        let mut values: Vec<Option<f64>> = Vec::with_capacity(ca.len());
        for value in ca.into_iter() {
            match value {
                None => values.push(None),
                Some(raw) => {
                    let mut stripped = raw.to_string();
                    for marker in markers {
                        stripped = stripped.replace(marker, "");
                    }
                    let parsed =
                        stripped
                            .trim()
                            .parse::<f64>()
                            .map_err(|_| CleanError::Parse {
                                column: name.to_string(),
                                value: raw.to_string(),
                            })?;
                    values.push(Some(parsed));
                }
            }
        }

        Ok(Series::new(name.into(), values))
    }
}
