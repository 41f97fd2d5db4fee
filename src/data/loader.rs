//! CSV Data Loader Module
//! Handles CSV file loading with configurable text encoding using Polars.

use encoding_rs::Encoding;
use polars::prelude::*;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

/// Default input encoding. Latin-1 maps every byte value, so it tolerates
/// input that a strict UTF-8 decoder would reject.
pub const DEFAULT_ENCODING: &str = "latin1";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown encoding label: {0}")]
    UnknownEncoding(String),
    #[error("Input contains bytes that cannot be decoded as {0}")]
    Decode(String),
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file, decoding it under the given encoding label first.
    ///
    /// The returned DataFrame mirrors the file's header and row order.
    /// Columns holding currency/unit-formatted text (e.g. `"$12,345"`)
    /// come back as string columns; plain decimal columns as numeric.
    pub fn load_csv(path: impl AsRef<Path>, encoding: &str) -> Result<DataFrame, LoaderError> {
        let bytes = fs::read(path.as_ref())?;

        let enc = Encoding::for_label(encoding.as_bytes())
            .ok_or_else(|| LoaderError::UnknownEncoding(encoding.to_string()))?;
        let (text, had_errors) = enc.decode_with_bom_removal(&bytes);
        if had_errors {
            return Err(LoaderError::Decode(encoding.to_string()));
        }

        let cursor = Cursor::new(text.into_owned().into_bytes());
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .into_reader_with_file_handle(cursor)
            .finish()?;

        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(bytes).unwrap();
        tmp.flush().unwrap();
        tmp
    }

    #[test]
    fn loads_header_and_rows_in_order() {
        let tmp = write_temp(b"brand,price\nbmw,\"$1,000\"\naudi,\"$2,000\"\n");
        let df = DataLoader::load_csv(tmp.path(), DEFAULT_ENCODING).unwrap();

        assert_eq!(df.get_column_names_str(), &["brand", "price"]);
        assert_eq!(df.height(), 2);
        let brands = df.column("brand").unwrap();
        assert_eq!(brands.str().unwrap().get(0), Some("bmw"));
        assert_eq!(brands.str().unwrap().get(1), Some("audi"));
        // Currency-formatted price must stay textual
        assert_eq!(
            df.column("price").unwrap().str().unwrap().get(0),
            Some("$1,000")
        );
    }

    #[test]
    fn latin1_accepts_arbitrary_bytes() {
        // 0xEB is "ë" in latin1 but an invalid UTF-8 sequence
        let tmp = write_temp(b"brand,price\ncitro\xebn,\"$1,000\"\n");
        let df = DataLoader::load_csv(tmp.path(), DEFAULT_ENCODING).unwrap();
        assert_eq!(
            df.column("brand").unwrap().str().unwrap().get(0),
            Some("citro\u{eb}n")
        );
    }

    #[test]
    fn strict_utf8_rejects_invalid_bytes() {
        let tmp = write_temp(b"brand,price\ncitro\xebn,\"$1,000\"\n");
        let err = DataLoader::load_csv(tmp.path(), "utf-8").unwrap_err();
        assert!(matches!(err, LoaderError::Decode(_)));
    }

    #[test]
    fn unknown_encoding_label_is_rejected() {
        let tmp = write_temp(b"brand\nbmw\n");
        let err = DataLoader::load_csv(tmp.path(), "klingon-8").unwrap_err();
        assert!(matches!(err, LoaderError::UnknownEncoding(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DataLoader::load_csv("/nonexistent/autos.csv", DEFAULT_ENCODING).unwrap_err();
        assert!(matches!(err, LoaderError::Io(_)));
    }
}
