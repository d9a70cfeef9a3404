use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read CSV data from '{path}'")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' in '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Column '{column}' could not be read as text")]
    ColumnType {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Failed to rebuild cleaned DataFrame for '{path}'")]
    Rebuild {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("No valid rows left in '{path}' after dropping {dropped} incomplete rows")]
    NoValidRows { path: PathBuf, dropped: usize },
}
