use crate::types::aqi_category::AqiCategory;
use chrono::NaiveDate;
use serde::Serialize;

pub(crate) const NO_DATA_INSIGHT: &str = "No data available for the selected range.";

/// Scalar statistics of a non-empty [`crate::FilteredView`].
///
/// Ties are resolved in input order: `max_aqi_date` is the date of the first reading
/// attaining `max_aqi`, and `latest_aqi` is the AQI of the first reading dated
/// `latest_date`.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Summary {
    pub mean_aqi: f64,
    /// Number of readings, duplicates included.
    pub day_count: usize,
    pub max_aqi: f64,
    pub max_aqi_date: NaiveDate,
    pub latest_date: NaiveDate,
    pub latest_aqi: f64,
}

impl Summary {
    pub fn latest_category(&self) -> AqiCategory {
        AqiCategory::classify(self.latest_aqi)
    }

    pub fn max_category(&self) -> AqiCategory {
        AqiCategory::classify(self.max_aqi)
    }

    /// One-sentence description of the selection, e.g.
    /// `Between 2020-01-01 and 2020-01-31, the average AQI in Delhi was 212.4. The worst AQI was 389 on 2020-01-12.`
    ///
    /// The worst AQI is truncated to an integer.
    pub fn insight(&self, city: &str, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "Between {} and {}, the average AQI in {} was {:.1}. The worst AQI was {} on {}.",
            start,
            end,
            city,
            self.mean_aqi,
            self.max_aqi.trunc() as i64,
            self.max_aqi_date
        )
    }
}

/// Running state used while scanning a view once.
#[derive(Debug)]
pub(crate) struct SummaryAccumulator {
    sum: f64,
    count: usize,
    max: Option<(f64, NaiveDate)>,
    latest: Option<(NaiveDate, f64)>,
}

impl SummaryAccumulator {
    pub fn new() -> Self {
        Self {
            sum: 0.0,
            count: 0,
            max: None,
            latest: None,
        }
    }

    pub fn add(&mut self, date: NaiveDate, aqi: f64) {
        self.sum += aqi;
        self.count += 1;
        // Strict comparisons keep the first reading on ties.
        if self.max.map_or(true, |(max, _)| aqi > max) {
            self.max = Some((aqi, date));
        }
        if self.latest.map_or(true, |(latest, _)| date > latest) {
            self.latest = Some((date, aqi));
        }
    }

    /// `None` when nothing was added.
    pub fn finish(self) -> Option<Summary> {
        let (max_aqi, max_aqi_date) = self.max?;
        let (latest_date, latest_aqi) = self.latest?;
        Some(Summary {
            mean_aqi: self.sum / self.count as f64,
            day_count: self.count,
            max_aqi,
            max_aqi_date,
            latest_date,
            latest_aqi,
        })
    }
}
