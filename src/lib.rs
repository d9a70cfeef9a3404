mod dataset;
mod error;
mod explorer;
mod filtering;
mod frames;
mod report;
mod types;
mod utils;

pub use error::AqiError;
pub use explorer::*;
pub use filtering::AqiFrameFilterExt;
pub use report::*;

pub use dataset::error::DatasetError;
pub use dataset::frame_cache::DatasetCache;

pub use frames::dataset::Dataset;
pub use frames::filtered_view::FilteredView;

pub use types::aqi_category::{classify, AqiCategory};
pub use types::period::{AnyDate, DateSpan, Month, Year};
pub use types::pivot_grid::{PivotCell, PivotGrid};
pub use types::reading::{Reading, TrendPoint};
pub use types::summary::Summary;
