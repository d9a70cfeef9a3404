use crate::dataset::error::DatasetError;
use chrono::NaiveDate;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AqiError {
    /// The source could not be read or held no usable reading. Fatal for the session.
    #[error("AQI data at '{path}' is unavailable")]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: DatasetError,
    },

    #[error("Start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("No AQI readings for {city} between {start} and {end}")]
    EmptyView {
        city: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Could not resolve the {0} date bound")]
    DateParsing(String),

    #[error("City '{0}' has no readings in the dataset")]
    UnknownCity(String),

    #[error("Failed to export readings as CSV")]
    Export(#[source] PolarsError),

    #[error("Failed to serialize report")]
    Json(#[from] serde_json::Error),

    #[error("Failed processing DataFrame: {0}")]
    Polars(#[from] PolarsError),
}
