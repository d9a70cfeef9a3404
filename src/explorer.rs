//! This module provides the main entry point of the crate: an explorer over one AQI
//! source file that owns the loaded dataset and resolves selections against it.

use crate::dataset::frame_cache::DatasetCache;
use crate::error::AqiError;
use crate::frames::dataset::Dataset;
use crate::frames::filtered_view::FilteredView;
use crate::report::Report;
use bon::bon;
use chrono::NaiveDate;
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_CITY: &str = "Delhi";

/// The composition root: configuration plus the dataset cache.
///
/// The dataset is loaded lazily on first use and at most once; every later call
/// reuses it. Create an instance with [`AqiExplorer::builder`].
///
/// # Examples
///
/// ```no_run
/// use aqi_explorer::AqiExplorer;
/// use chrono::NaiveDate;
///
/// # fn main() -> Result<(), aqi_explorer::AqiError> {
/// let explorer = AqiExplorer::builder().source("city_day.csv").build();
///
/// // Default city ("Delhi" when present) over its whole recorded range
/// let view = explorer.view().call()?;
/// println!("{}", explorer.report(&view)?.insight);
///
/// // Explicit selection
/// let view = explorer
///     .view()
///     .city("Mumbai")
///     .start(NaiveDate::from_ymd_opt(2019, 1, 1).unwrap())
///     .call()?;
/// println!("{} readings", view.len());
/// # Ok(())
/// # }
/// ```
pub struct AqiExplorer {
    source: PathBuf,
    default_city: String,
    cache: DatasetCache,
}

#[bon]
impl AqiExplorer {
    /// Creates an explorer over a CSV source. Nothing is read until the dataset is
    /// first needed.
    ///
    /// # Arguments
    ///
    /// * `.source(impl Into<PathBuf>)`: **Required.** Path of the AQI CSV file.
    /// * `.default_city(impl Into<String>)`: Optional. City preselected when a view
    ///   names none. Defaults to `"Delhi"`; if that city is absent from the data the
    ///   alphabetically first city is used instead.
    #[builder]
    pub fn new(
        #[builder(into)] source: PathBuf,
        #[builder(into)] default_city: Option<String>,
    ) -> Self {
        Self {
            source,
            default_city: default_city.unwrap_or_else(|| DEFAULT_CITY.to_string()),
            cache: DatasetCache::new(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The cleaned dataset, loaded on first call.
    ///
    /// # Errors
    ///
    /// Returns [`AqiError::DataUnavailable`] if the source cannot be loaded. A failed
    /// load is retried on the next call.
    pub fn dataset(&self) -> Result<Arc<Dataset>, AqiError> {
        self.cache.get_or_load(&self.source)
    }

    /// Sorted distinct city names.
    pub fn cities(&self) -> Result<Vec<String>, AqiError> {
        self.dataset()?.cities()
    }

    /// The configured default city if the dataset has it, otherwise the first city.
    pub fn default_city(&self) -> Result<String, AqiError> {
        let cities = self.cities()?;
        if cities.contains(&self.default_city) {
            return Ok(self.default_city.clone());
        }
        debug!(
            "Default city '{}' not in dataset, falling back to the first city",
            self.default_city
        );
        cities
            .into_iter()
            .next()
            .ok_or_else(|| AqiError::UnknownCity(self.default_city.clone()))
    }

    /// Selects one city's readings over an inclusive date range.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.city(&str)`: Optional. Defaults to [`AqiExplorer::default_city`].
    /// * `.start(NaiveDate)`: Optional. Defaults to the city's earliest reading.
    /// * `.end(NaiveDate)`: Optional. Defaults to the city's latest reading.
    ///
    /// # Errors
    ///
    /// * [`AqiError::DataUnavailable`] if the dataset cannot be loaded.
    /// * [`AqiError::UnknownCity`] if a bound must be derived from a city that has no readings.
    /// * [`AqiError::InvalidRange`] if the start lies after the end.
    #[builder]
    pub fn view(
        &self,
        city: Option<&str>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<FilteredView, AqiError> {
        let dataset = self.dataset()?;
        let city = match city {
            Some(city) => city.to_string(),
            None => self.default_city()?,
        };

        let (start, end) = match (start, end) {
            (Some(start), Some(end)) => (start, end),
            (start, end) => {
                let (first, last) = dataset
                    .date_bounds(&city)?
                    .ok_or_else(|| AqiError::UnknownCity(city.clone()))?;
                (start.unwrap_or(first), end.unwrap_or(last))
            }
        };

        dataset.filter(&city, start, end)
    }

    /// Latest reading, summary, heatmap and insight text for a view.
    pub fn report(&self, view: &FilteredView) -> Result<Report, AqiError> {
        Report::build(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_support::{date, write_csv};
    use tempfile::NamedTempFile;

    fn source() -> NamedTempFile {
        write_csv(&[
            "Ahmedabad,2019-01-01,1,1,300,Poor",
            "Delhi,2019-03-01,1,1,200,Moderate",
            "Delhi,2019-01-15,1,1,350,Very Poor",
            "Delhi,2020-06-30,1,1,80,Satisfactory",
            "Mumbai,2020-01-01,1,1,90,Satisfactory",
        ])
    }

    #[test]
    fn test_dataset_is_loaded_once() -> Result<(), AqiError> {
        let file = source();
        let explorer = AqiExplorer::builder().source(file.path()).build();

        let first = explorer.dataset()?;
        let second = explorer.dataset()?;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(explorer.cities()?, vec!["Ahmedabad", "Delhi", "Mumbai"]);
        Ok(())
    }

    #[test]
    fn test_default_city_prefers_configured() -> Result<(), AqiError> {
        let file = source();
        let explorer = AqiExplorer::builder().source(file.path()).build();
        assert_eq!(explorer.default_city()?, "Delhi");

        let explorer = AqiExplorer::builder()
            .source(file.path())
            .default_city("Mumbai")
            .build();
        assert_eq!(explorer.default_city()?, "Mumbai");

        let explorer = AqiExplorer::builder()
            .source(file.path())
            .default_city("Chennai")
            .build();
        assert_eq!(explorer.default_city()?, "Ahmedabad");
        Ok(())
    }

    #[test]
    fn test_view_defaults_to_city_bounds() -> Result<(), AqiError> {
        let file = source();
        let explorer = AqiExplorer::builder().source(file.path()).build();

        let view = explorer.view().call()?;
        assert_eq!(view.city(), "Delhi");
        assert_eq!(view.start(), date(2019, 1, 15));
        assert_eq!(view.end(), date(2020, 6, 30));
        assert_eq!(view.len(), 3);

        let view = explorer.view().start(date(2019, 2, 1)).call()?;
        assert_eq!(view.len(), 2);
        assert_eq!(view.end(), date(2020, 6, 30));
        Ok(())
    }

    #[test]
    fn test_view_explicit_selection() -> Result<(), AqiError> {
        let file = source();
        let explorer = AqiExplorer::builder().source(file.path()).build();

        let view = explorer
            .view()
            .city("Mumbai")
            .start(date(2020, 1, 1))
            .end(date(2020, 1, 1))
            .call()?;
        assert_eq!(view.len(), 1);

        // Explicit bounds for a city without data is a valid, empty selection.
        let view = explorer
            .view()
            .city("Chennai")
            .start(date(2020, 1, 1))
            .end(date(2020, 12, 31))
            .call()?;
        assert!(view.is_empty());
        Ok(())
    }

    #[test]
    fn test_view_errors() {
        let file = source();
        let explorer = AqiExplorer::builder().source(file.path()).build();

        assert!(matches!(
            explorer.view().city("Chennai").call(),
            Err(AqiError::UnknownCity(city)) if city == "Chennai"
        ));
        assert!(matches!(
            explorer
                .view()
                .start(date(2020, 1, 2))
                .end(date(2020, 1, 1))
                .call(),
            Err(AqiError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_missing_source_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let explorer = AqiExplorer::builder()
            .source(dir.path().join("city_day.csv"))
            .build();
        assert!(matches!(
            explorer.view().call(),
            Err(AqiError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_report() -> Result<(), AqiError> {
        let file = source();
        let explorer = AqiExplorer::builder().source(file.path()).build();
        let view = explorer.view().call()?;
        let report = explorer.report(&view)?;

        let latest = report.latest.unwrap();
        assert_eq!(latest.date, date(2020, 6, 30));
        assert_eq!(latest.aqi, 80.0);
        assert_eq!(report.summary.unwrap().max_aqi_date, date(2019, 1, 15));
        Ok(())
    }
}
