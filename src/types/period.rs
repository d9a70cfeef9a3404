//! Date-like inputs accepted as filter bounds.
//!
//! A bound can be an exact [`NaiveDate`], a `YYYY-MM-DD` string, a whole [`Year`] or a
//! single [`Month`]. Each resolves into a [`DateSpan`]; filters take the span's first
//! day as a start bound and its last day as an end bound.

use crate::utils::parse_date_prefix;
use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;
use std::fmt::{Display, Formatter};

/// An inclusive span of calendar days.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Year(pub i32);

impl Year {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl Display for Year {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A calendar month of a given year, stored as `(year, month)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Month(pub i32, pub u32);

impl Month {
    pub fn new(month: u32, year: i32) -> Self {
        Self(year, month)
    }
    pub fn year(self) -> i32 {
        self.0
    }
    pub fn month(self) -> u32 {
        self.1
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.0, self.1)
    }
}

/// Anything that can be resolved into an inclusive [`DateSpan`].
///
/// Returns `None` when the value does not describe a real calendar period
/// (a malformed string, month 13, ...).
pub trait AnyDate {
    fn date_span(self) -> Option<DateSpan>;
}

impl AnyDate for NaiveDate {
    fn date_span(self) -> Option<DateSpan> {
        Some(DateSpan {
            start: self,
            end: self,
        })
    }
}

impl AnyDate for &str {
    fn date_span(self) -> Option<DateSpan> {
        parse_date_prefix(self)?.date_span()
    }
}

impl AnyDate for String {
    fn date_span(self) -> Option<DateSpan> {
        self.as_str().date_span()
    }
}

impl AnyDate for Year {
    fn date_span(self) -> Option<DateSpan> {
        Some(DateSpan {
            start: NaiveDate::from_ymd_opt(self.0, 1, 1)?,
            end: NaiveDate::from_ymd_opt(self.0, 12, 31)?,
        })
    }
}

impl AnyDate for Month {
    fn date_span(self) -> Option<DateSpan> {
        let (year, month) = (self.year(), self.month());
        Some(DateSpan {
            start: NaiveDate::from_ymd_opt(year, month, 1)?,
            end: NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)?)?,
        })
    }
}

pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some((first_of_next - Duration::days(1)).day())
}
