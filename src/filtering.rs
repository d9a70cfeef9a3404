use crate::dataset::{COL_CITY, COL_DATE};
use chrono::NaiveDate;
use polars::prelude::{col, lit, DataType, LazyFrame};

pub trait AqiFrameFilterExt {
    /// Keeps rows whose `City` equals `city` exactly.
    fn filter_city(self, city: &str) -> LazyFrame;

    /// Keeps rows whose `Date` lies in `[start_date, end_date]` (both inclusive).
    /// Assumes the `Date` column was parsed to `DataType::Date` at load.
    ///
    /// An inverted range simply matches nothing; range validation happens in
    /// [`crate::Dataset::filter`].
    fn filter_dates(self, start_date: NaiveDate, end_date: NaiveDate) -> LazyFrame;
}

impl AqiFrameFilterExt for LazyFrame {
    fn filter_city(self, city: &str) -> LazyFrame {
        self.filter(col(COL_CITY).eq(lit(city)))
    }

    fn filter_dates(self, start_date: NaiveDate, end_date: NaiveDate) -> LazyFrame {
        self.filter(
            col(COL_DATE)
                .cast(DataType::Date)
                .gt_eq(lit(start_date))
                .and(col(COL_DATE).cast(DataType::Date).lt_eq(lit(end_date))),
        )
    }
}
