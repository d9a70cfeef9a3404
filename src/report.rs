//! Bundles everything a dashboard shows for one selection into a single serializable value.

use crate::frames::filtered_view::FilteredView;
use crate::types::aqi_category::AqiCategory;
use crate::types::pivot_grid::PivotGrid;
use crate::types::summary::{Summary, NO_DATA_INSIGHT};
use crate::AqiError;
use chrono::NaiveDate;
use serde::Serialize;

/// The most recent reading of a selection and its severity.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct LatestReading {
    pub date: NaiveDate,
    pub aqi: f64,
    pub category: AqiCategory,
}

/// Derived values for one city and date range.
///
/// `latest` and `summary` are `None` for an empty selection, in which case
/// `insight` carries the no-data message and `pivot` is empty.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Report {
    pub city: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub latest: Option<LatestReading>,
    pub summary: Option<Summary>,
    pub pivot: PivotGrid,
    pub insight: String,
}

impl Report {
    pub fn build(view: &FilteredView) -> Result<Self, AqiError> {
        let summary = match view.summarize() {
            Ok(summary) => Some(summary),
            Err(AqiError::EmptyView { .. }) => None,
            Err(e) => return Err(e),
        };

        let latest = summary.as_ref().map(|summary| LatestReading {
            date: summary.latest_date,
            aqi: summary.latest_aqi,
            category: summary.latest_category(),
        });
        let insight = summary
            .as_ref()
            .map(|summary| summary.insight(view.city(), view.start(), view.end()))
            .unwrap_or_else(|| NO_DATA_INSIGHT.to_string());

        Ok(Self {
            city: view.city().to_string(),
            start: view.start(),
            end: view.end(),
            latest,
            summary,
            pivot: view.pivot()?,
            insight,
        })
    }

    pub fn to_json(&self) -> Result<String, AqiError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
