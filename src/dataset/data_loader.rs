use crate::dataset::error::DatasetError;
use crate::dataset::{COL_AQI, COL_CITY, COL_DATE, REQUIRED_COLUMNS};
use crate::utils::{parse_aqi, parse_date_prefix};
use chrono::NaiveDate;
use log::{debug, info, warn};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Reads an air quality CSV and cleans it into the dataset layout:
/// `City` text, `Date` as a polars `Date`, `AQI` as `Float64`, every other column
/// kept as the text it was read as.
pub struct DatasetLoader {
    path: PathBuf,
}

impl DatasetLoader {
    pub fn new(path: &Path) -> DatasetLoader {
        DatasetLoader {
            path: path.to_path_buf(),
        }
    }

    /// Reads and cleans the source. Rows without a city, with an unparseable AQI or
    /// with an unparseable date are dropped silently (the count is logged).
    pub fn load(&self) -> Result<DataFrame, DatasetError> {
        let raw = self.read_csv()?;
        debug!(
            "Read {} rows with columns {:?} from {:?}",
            raw.height(),
            raw.get_column_names(),
            self.path
        );

        for column in REQUIRED_COLUMNS {
            if !raw
                .get_column_names()
                .iter()
                .any(|name| name.as_str() == column)
            {
                warn!("Column '{}' missing from {:?}", column, self.path);
                return Err(DatasetError::MissingColumn {
                    path: self.path.clone(),
                    column: column.to_string(),
                });
            }
        }

        self.clean(raw)
    }

    /// Every column is read as text so that pass-through fields keep their exact
    /// representation; the required columns are parsed in [`Self::clean`].
    fn read_csv(&self) -> Result<DataFrame, DatasetError> {
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(self.path.clone()))
            .map_err(|e| DatasetError::CsvRead {
                path: self.path.clone(),
                source: e,
            })?
            .finish()
            .map_err(|e| DatasetError::CsvRead {
                path: self.path.clone(),
                source: e,
            })
    }

    fn clean(&self, raw: DataFrame) -> Result<DataFrame, DatasetError> {
        let cities = text_column(&raw, COL_CITY)?;
        let dates = text_column(&raw, COL_DATE)?;
        let aqis = text_column(&raw, COL_AQI)?;

        let mut keep = Vec::with_capacity(raw.height());
        let mut kept_dates = Vec::with_capacity(raw.height());
        let mut kept_aqis = Vec::with_capacity(raw.height());
        for ((city, date), aqi) in cities.into_iter().zip(dates).zip(aqis) {
            match clean_row(city, date, aqi) {
                Some((date, aqi)) => {
                    keep.push(true);
                    kept_dates.push(date);
                    kept_aqis.push(aqi);
                }
                None => keep.push(false),
            }
        }

        let dropped = raw.height() - kept_dates.len();
        if kept_dates.is_empty() {
            warn!(
                "No valid rows in {:?}, all {} rows were incomplete",
                self.path, dropped
            );
            return Err(DatasetError::NoValidRows {
                path: self.path.clone(),
                dropped,
            });
        }

        let mask: BooleanChunked = keep.into_iter().collect();
        let rebuild_err = |e| DatasetError::Rebuild {
            path: self.path.clone(),
            source: e,
        };
        let mut cleaned = raw.filter(&mask).map_err(rebuild_err)?;
        cleaned
            .with_column(Series::new(COL_DATE.into(), kept_dates))
            .map_err(rebuild_err)?;
        cleaned
            .with_column(Series::new(COL_AQI.into(), kept_aqis))
            .map_err(rebuild_err)?;

        info!(
            "Loaded {} readings from {:?} ({} incomplete rows dropped)",
            cleaned.height(),
            self.path,
            dropped
        );
        Ok(cleaned)
    }
}

fn text_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked, DatasetError> {
    df.column(name)
        .and_then(|column| column.str())
        .map_err(|e| DatasetError::ColumnType {
            column: name.to_string(),
            source: e,
        })
}

/// Returns the parsed `(date, aqi)` of a row worth keeping.
pub(crate) fn clean_row(
    city: Option<&str>,
    date: Option<&str>,
    aqi: Option<&str>,
) -> Option<(NaiveDate, f64)> {
    city.filter(|city| !city.trim().is_empty())?;
    let aqi = aqi.and_then(parse_aqi)?;
    let date = date.and_then(parse_date_prefix)?;
    Some((date, aqi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_support::{date, write_csv, write_raw};

    #[test]
    fn test_clean_row() {
        assert_eq!(
            clean_row(Some("Delhi"), Some("2020-01-01"), Some("184")),
            Some((date(2020, 1, 1), 184.0))
        );
        assert_eq!(clean_row(None, Some("2020-01-01"), Some("184")), None);
        assert_eq!(clean_row(Some("  "), Some("2020-01-01"), Some("184")), None);
        assert_eq!(clean_row(Some("Delhi"), None, Some("184")), None);
        assert_eq!(clean_row(Some("Delhi"), Some("someday"), Some("184")), None);
        assert_eq!(clean_row(Some("Delhi"), Some("2020-01-01"), None), None);
        assert_eq!(clean_row(Some("Delhi"), Some("2020-01-01"), Some("high")), None);
    }

    #[test]
    fn test_load_drops_incomplete_rows() -> Result<(), Box<dyn std::error::Error>> {
        let file = write_csv(&[
            "Delhi,2020-01-01,81.40,124.50,184,Moderate",
            ",2020-01-02,80.00,120.00,190,Moderate",
            "Delhi,2020-01-03,75.10,110.20,,",
            "Delhi,not-a-date,70.00,100.00,150,Moderate",
            "Mumbai,2020-01-01 00:00:00,40.00,60.00,95,Satisfactory",
        ]);
        let df = DatasetLoader::new(file.path()).load()?;

        assert_eq!(df.height(), 2);
        assert_eq!(df.column(COL_DATE)?.dtype(), &DataType::Date);
        assert_eq!(df.column(COL_AQI)?.dtype(), &DataType::Float64);

        let cities: Vec<_> = df.column(COL_CITY)?.str()?.into_iter().collect();
        assert_eq!(cities, vec![Some("Delhi"), Some("Mumbai")]);

        let dates: Vec<_> = df.column(COL_DATE)?.date()?.as_date_iter().collect();
        assert_eq!(dates, vec![Some(date(2020, 1, 1)), Some(date(2020, 1, 1))]);

        let aqis: Vec<_> = df.column(COL_AQI)?.f64()?.into_iter().collect();
        assert_eq!(aqis, vec![Some(184.0), Some(95.0)]);
        Ok(())
    }

    #[test]
    fn test_load_keeps_other_columns_verbatim() -> Result<(), Box<dyn std::error::Error>> {
        let file = write_csv(&["Delhi,2020-01-01,81.40,124.50,184,Moderate"]);
        let df = DatasetLoader::new(file.path()).load()?;

        let names: Vec<_> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["City", "Date", "PM2.5", "PM10", "AQI", "AQI_Bucket"]);
        assert_eq!(df.column("PM2.5")?.str()?.get(0), Some("81.40"));
        assert_eq!(df.column("AQI_Bucket")?.str()?.get(0), Some("Moderate"));
        Ok(())
    }

    #[test]
    fn test_missing_column() {
        let file = write_raw("City,Date,PM10\nDelhi,2020-01-01,124.5\n");
        let err = DatasetLoader::new(file.path()).load().unwrap_err();
        assert!(
            matches!(err, DatasetError::MissingColumn { ref column, .. } if column == "AQI"),
            "unexpected error: {:?}",
            err
        );
    }

    #[test]
    fn test_no_valid_rows() {
        let file = write_csv(&[",2020-01-01,1,1,50,Good", "Delhi,2020-01-02,1,1,,"]);
        let err = DatasetLoader::new(file.path()).load().unwrap_err();
        assert!(
            matches!(err, DatasetError::NoValidRows { dropped: 2, .. }),
            "unexpected error: {:?}",
            err
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DatasetLoader::new(&dir.path().join("city_day.csv"))
            .load()
            .unwrap_err();
        assert!(matches!(err, DatasetError::CsvRead { .. }));
    }
}
