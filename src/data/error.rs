use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a file into a usable [`MovieDataset`](super::model::MovieDataset).
///
/// Every variant is fatal for that file: no partial dataset is ever served.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("malformed arrow data: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("required column '{0}' is missing")]
    MissingColumn(&'static str),
    #[error("row {row}: column '{column}' has unsupported type {data_type}")]
    UnsupportedType {
        row: usize,
        column: &'static str,
        data_type: String,
    },
    #[error("row {row}: column '{column}' expects a number, got '{value}'")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("no usable records after dropping incomplete and duplicate rows")]
    Empty,
}

/// Programmer error: a filter column or axis name outside the fixed mappings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown filter column '{0}'")]
    UnknownColumn(String),
    #[error("unknown axis '{0}'")]
    UnknownAxis(String),
}
