// filtered_view.rs

//! Contains the `FilteredView` structure: one city's readings over a date range, and
//! the aggregations computed from it.

use crate::dataset::{COL_AQI, COL_CITY, COL_DATE};
use crate::types::pivot_grid::PivotGrid;
use crate::types::reading::{Reading, TrendPoint};
use crate::types::summary::{Summary, SummaryAccumulator};
use crate::AqiError;
use chrono::NaiveDate;
use polars::prelude::*;
use std::io::Write;

const COL_MONTH: &str = "month";
const COL_DAY: &str = "day";

/// The readings of one city within an inclusive date range, in dataset order.
///
/// Instances are obtained via [`crate::Dataset::filter`] or
/// [`crate::AqiExplorer::view`]. A view is a value: it is rebuilt for every new
/// selection and never mutated. An empty view is valid; only [`FilteredView::summarize`]
/// treats it as an error.
#[derive(Clone, Debug)]
pub struct FilteredView {
    city: String,
    start: NaiveDate,
    end: NaiveDate,
    frame: DataFrame,
}

impl FilteredView {
    pub(crate) fn new(city: &str, start: NaiveDate, end: NaiveDate, frame: DataFrame) -> Self {
        Self {
            city: city.to_string(),
            start,
            end,
            frame,
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// The selected rows with every source column.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub(crate) fn into_frame(self) -> DataFrame {
        self.frame
    }

    /// Number of readings, duplicates included.
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Scalar statistics over the view in a single pass.
    ///
    /// Ties are deterministic: the maximum's date and the latest date's AQI are both
    /// taken from the first matching reading in view order.
    ///
    /// # Errors
    ///
    /// Returns [`AqiError::EmptyView`] when the view has no readings, rather than a
    /// meaningless mean of nothing.
    pub fn summarize(&self) -> Result<Summary, AqiError> {
        let dates = self.frame.column(COL_DATE)?.date()?;
        let aqis = self.frame.column(COL_AQI)?.f64()?;

        let mut accumulator = SummaryAccumulator::new();
        for (date, aqi) in dates.as_date_iter().zip(aqis) {
            if let (Some(date), Some(aqi)) = (date, aqi) {
                accumulator.add(date, aqi);
            }
        }

        accumulator.finish().ok_or_else(|| AqiError::EmptyView {
            city: self.city.clone(),
            start: self.start,
            end: self.end,
        })
    }

    /// Mean AQI per (month, day-of-month), years merged. An empty view gives an empty grid.
    pub fn pivot(&self) -> Result<PivotGrid, AqiError> {
        if self.is_empty() {
            return Ok(PivotGrid::default());
        }

        let grouped = self
            .frame
            .clone()
            .lazy()
            .group_by([
                col(COL_DATE).dt().month().cast(DataType::UInt32).alias(COL_MONTH),
                col(COL_DATE).dt().day().cast(DataType::UInt32).alias(COL_DAY),
            ])
            .agg([col(COL_AQI).mean()])
            .collect()?;

        let months = grouped.column(COL_MONTH)?.u32()?;
        let days = grouped.column(COL_DAY)?.u32()?;
        let means = grouped.column(COL_AQI)?.f64()?;

        Ok(PivotGrid::from_cells(
            months
                .into_iter()
                .zip(days)
                .zip(means)
                .filter_map(|((month, day), mean)| Some(((month?, day?), mean?))),
        ))
    }

    /// The readings in view order.
    pub fn readings(&self) -> Result<Vec<Reading>, AqiError> {
        let cities = self.frame.column(COL_CITY)?.str()?;
        let dates = self.frame.column(COL_DATE)?.date()?;
        let aqis = self.frame.column(COL_AQI)?.f64()?;

        Ok(cities
            .into_iter()
            .zip(dates.as_date_iter())
            .zip(aqis)
            .filter_map(|((city, date), aqi)| {
                Some(Reading {
                    city: city?.to_string(),
                    date: date?,
                    aqi: aqi?,
                })
            })
            .collect())
    }

    /// The AQI-over-time series, sorted by date. Readings sharing a date keep view order.
    pub fn trend(&self) -> Result<Vec<TrendPoint>, AqiError> {
        let mut points: Vec<TrendPoint> = self
            .readings()?
            .into_iter()
            .map(|reading| TrendPoint {
                date: reading.date,
                aqi: reading.aqi,
            })
            .collect();
        points.sort_by_key(|point| point.date);
        Ok(points)
    }

    /// The last `n` rows, for a raw-data table.
    pub fn tail(&self, n: usize) -> DataFrame {
        self.frame.tail(Some(n))
    }

    /// Writes the view as CSV: a header row, then every source column in dataset
    /// order with dates normalized to `YYYY-MM-DD`. Loading the output with
    /// [`crate::Dataset::load`] reproduces the view's rows.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<(), AqiError> {
        let mut frame = self.frame.clone();
        CsvWriter::new(writer)
            .include_header(true)
            .finish(&mut frame)
            .map_err(AqiError::Export)
    }

    pub fn export_bytes(&self) -> Result<Vec<u8>, AqiError> {
        let mut buffer = Vec::new();
        self.export_csv(&mut buffer)?;
        Ok(buffer)
    }

    /// Suggested download name, e.g. `AQI_Delhi.csv`.
    pub fn export_file_name(&self) -> String {
        format!("AQI_{}.csv", self.city)
    }
}
