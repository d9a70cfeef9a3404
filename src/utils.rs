use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a leading `YYYY-MM-DD` date, truncating an optional time-of-day suffix
/// separated by a space or a `T` (e.g. `2020-01-05 00:00:00`).
pub(crate) fn parse_date_prefix(raw: &str) -> Option<NaiveDate> {
    let (date, remainder) = NaiveDate::parse_and_remainder(raw.trim(), DATE_FORMAT).ok()?;
    if remainder.is_empty() || remainder.starts_with(' ') || remainder.starts_with('T') {
        Some(date)
    } else {
        None
    }
}

/// Parses an AQI cell. Only finite numbers count as readings.
pub(crate) fn parse_aqi(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}
