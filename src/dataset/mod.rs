pub mod data_loader;
pub mod error;
pub mod frame_cache;

// Source columns, as named in the CPCB `city_day.csv` export.
pub(crate) const COL_CITY: &str = "City";
pub(crate) const COL_DATE: &str = "Date";
pub(crate) const COL_AQI: &str = "AQI";

pub(crate) const REQUIRED_COLUMNS: [&str; 3] = [COL_CITY, COL_DATE, COL_AQI];
