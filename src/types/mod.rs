pub mod aqi_category;
pub mod period;
pub mod pivot_grid;
pub mod reading;
pub mod summary;
