//! Contains the `Dataset` structure, the cleaned and immutable table of AQI readings.

use crate::dataset::data_loader::DatasetLoader;
use crate::dataset::{COL_CITY, COL_DATE};
use crate::filtering::AqiFrameFilterExt;
use crate::frames::filtered_view::FilteredView;
use crate::types::period::AnyDate;
use crate::AqiError;
use chrono::NaiveDate;
use log::debug;
use polars::prelude::{DataFrame, IntoLazy};
use std::collections::BTreeSet;
use std::path::Path;

/// The full set of readings, loaded once and never mutated.
///
/// Backed by a polars [`DataFrame`] with a text `City` column, a `Date` column of
/// [`polars::prelude::DataType::Date`], a `Float64` `AQI` column and any other source
/// columns kept as text. No row has a null city, date or AQI.
///
/// Cloning is cheap: polars frames share their column buffers.
///
/// # Example
///
/// ```no_run
/// use aqi_explorer::Dataset;
///
/// # fn main() -> Result<(), aqi_explorer::AqiError> {
/// let dataset = Dataset::load("city_day.csv")?;
/// let view = dataset.filter("Delhi", "2020-01-01", "2020-03-31")?;
/// println!("{} readings for Delhi in Q1 2020", view.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Dataset {
    frame: DataFrame,
}

impl Dataset {
    /// Loads and cleans a CSV source.
    ///
    /// # Errors
    ///
    /// Returns [`AqiError::DataUnavailable`] if the file cannot be read, lacks one of
    /// the `City`, `Date` or `AQI` columns, or has no valid row left after cleaning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AqiError> {
        let path = path.as_ref();
        let frame =
            DatasetLoader::new(path)
                .load()
                .map_err(|source| AqiError::DataUnavailable {
                    path: path.to_path_buf(),
                    source,
                })?;
        Ok(Self { frame })
    }

    /// The underlying cleaned frame.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Distinct city names, sorted.
    pub fn cities(&self) -> Result<Vec<String>, AqiError> {
        let cities = self.frame.column(COL_CITY)?.str()?;
        Ok(cities
            .into_iter()
            .flatten()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    pub fn contains_city(&self, city: &str) -> Result<bool, AqiError> {
        let cities = self.frame.column(COL_CITY)?.str()?;
        Ok(cities.into_iter().flatten().any(|name| name == city))
    }

    /// Earliest and latest reading date for `city`, `None` when the city has no readings.
    pub fn date_bounds(&self, city: &str) -> Result<Option<(NaiveDate, NaiveDate)>, AqiError> {
        let cities = self.frame.column(COL_CITY)?.str()?;
        let dates = self.frame.column(COL_DATE)?.date()?;

        Ok(cities
            .into_iter()
            .zip(dates.as_date_iter())
            .filter_map(|(name, date)| (name == Some(city)).then_some(date).flatten())
            .fold(None, |bounds, date| match bounds {
                None => Some((date, date)),
                Some((min, max)) => Some((min.min(date), max.max(date))),
            }))
    }

    /// Narrows the dataset to one city and an inclusive date range.
    ///
    /// `start` resolves to the first day of its span and `end` to the last, so
    /// `filter("Delhi", Year(2019), Year(2020))` covers 2019-01-01 through 2020-12-31.
    /// No matching reading yields an empty view, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AqiError::DateParsing`] if a bound cannot be resolved to a date and
    /// [`AqiError::InvalidRange`] if the resolved start lies after the resolved end.
    pub fn filter(
        &self,
        city: &str,
        start: impl AnyDate,
        end: impl AnyDate,
    ) -> Result<FilteredView, AqiError> {
        let start = start
            .date_span()
            .ok_or_else(|| AqiError::DateParsing("start".to_string()))?
            .start;
        let end = end
            .date_span()
            .ok_or_else(|| AqiError::DateParsing("end".to_string()))?
            .end;
        if start > end {
            return Err(AqiError::InvalidRange { start, end });
        }

        let frame = self
            .frame
            .clone()
            .lazy()
            .filter_city(city)
            .filter_dates(start, end)
            .collect()?;
        debug!(
            "Filtered {} readings down to {} for {} between {} and {}",
            self.frame.height(),
            frame.height(),
            city,
            start,
            end
        );
        Ok(FilteredView::new(city, start, end, frame))
    }
}

/// A view's rows satisfy the dataset invariants, so it can be filtered again.
impl From<FilteredView> for Dataset {
    fn from(view: FilteredView) -> Self {
        Self {
            frame: view.into_frame(),
        }
    }
}
