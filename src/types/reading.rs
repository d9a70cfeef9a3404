use crate::types::aqi_category::AqiCategory;
use chrono::NaiveDate;
use serde::Serialize;

/// One dated, city-scoped AQI observation.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Reading {
    pub city: String,   // City
    pub date: NaiveDate, // Date
    pub aqi: f64,        // AQI
}

impl Reading {
    pub fn category(&self) -> AqiCategory {
        AqiCategory::classify(self.aqi)
    }
}

/// A point of the AQI-over-time series.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub aqi: f64,
}
