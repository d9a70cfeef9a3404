//! Defines the `AqiCategory` enum, the six ordered severity buckets of the Indian
//! National AQI scale, and the threshold ladder that maps a reading onto them.

use serde::Serialize;
use std::fmt;

/// Severity bucket of an AQI value, ordered from least to most severe.
///
/// Use [`AqiCategory::classify`] (or the free function [`classify`]) to map a
/// numeric AQI onto a category. The derived `Ord` follows severity, so
/// `AqiCategory::Good < AqiCategory::Hazardous`.
///
/// # Examples
///
/// ```rust
/// use aqi_explorer::AqiCategory;
///
/// assert_eq!(AqiCategory::classify(50.0), AqiCategory::Good);
/// assert_eq!(AqiCategory::classify(51.0), AqiCategory::Moderate);
/// assert!(AqiCategory::classify(420.0) > AqiCategory::VeryUnhealthy);
/// assert_eq!(AqiCategory::Unhealthy.to_string(), "🔴 Unhealthy");
/// ```
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize)]
pub enum AqiCategory {
    /// 0 to 50.
    Good,
    /// 51 to 100.
    Moderate,
    /// 101 to 200.
    UnhealthySensitive,
    /// 201 to 300.
    Unhealthy,
    /// 301 to 400.
    VeryUnhealthy,
    /// Above 400.
    Hazardous,
}

/// Inclusive upper bounds, checked in ascending order. Anything above the last
/// bound is [`AqiCategory::Hazardous`].
const LADDER: [(f64, AqiCategory); 5] = [
    (50.0, AqiCategory::Good),
    (100.0, AqiCategory::Moderate),
    (200.0, AqiCategory::UnhealthySensitive),
    (300.0, AqiCategory::Unhealthy),
    (400.0, AqiCategory::VeryUnhealthy),
];

impl AqiCategory {
    /// All categories in ascending severity.
    pub const ALL: [AqiCategory; 6] = [
        AqiCategory::Good,
        AqiCategory::Moderate,
        AqiCategory::UnhealthySensitive,
        AqiCategory::Unhealthy,
        AqiCategory::VeryUnhealthy,
        AqiCategory::Hazardous,
    ];

    /// Maps an AQI value onto its bucket. Total: negative values are `Good`,
    /// and NaN (which a loaded dataset never contains) is `Hazardous`.
    pub fn classify(aqi: f64) -> Self {
        LADDER
            .iter()
            .find(|(upper, _)| aqi <= *upper)
            .map(|(_, category)| *category)
            .unwrap_or(AqiCategory::Hazardous)
    }

    /// Inclusive upper bound of the bucket, `None` for the open-ended `Hazardous`.
    pub fn upper_bound(self) -> Option<f64> {
        LADDER
            .iter()
            .find(|(_, category)| *category == self)
            .map(|(upper, _)| *upper)
    }

    pub fn label(self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    /// Colored indicator shown next to the label.
    pub fn emoji(self) -> &'static str {
        match self {
            AqiCategory::Good => "🟢",
            AqiCategory::Moderate => "🟡",
            AqiCategory::UnhealthySensitive => "🟠",
            AqiCategory::Unhealthy => "🔴",
            AqiCategory::VeryUnhealthy => "🟣",
            AqiCategory::Hazardous => "⚫",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.label())
    }
}

/// Shorthand for [`AqiCategory::classify`].
pub fn classify(aqi: f64) -> AqiCategory {
    AqiCategory::classify(aqi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(0.0), AqiCategory::Good);
        assert_eq!(classify(50.0), AqiCategory::Good);
        assert_eq!(classify(50.5), AqiCategory::Moderate);
        assert_eq!(classify(51.0), AqiCategory::Moderate);
        assert_eq!(classify(100.0), AqiCategory::Moderate);
        assert_eq!(classify(101.0), AqiCategory::UnhealthySensitive);
        assert_eq!(classify(200.0), AqiCategory::UnhealthySensitive);
        assert_eq!(classify(201.0), AqiCategory::Unhealthy);
        assert_eq!(classify(300.0), AqiCategory::Unhealthy);
        assert_eq!(classify(301.0), AqiCategory::VeryUnhealthy);
        assert_eq!(classify(400.0), AqiCategory::VeryUnhealthy);
        assert_eq!(classify(401.0), AqiCategory::Hazardous);
        assert_eq!(classify(2049.0), AqiCategory::Hazardous);
    }

    #[test]
    fn test_negative_is_lowest_bucket() {
        assert_eq!(classify(-3.0), AqiCategory::Good);
    }

    #[test]
    fn test_classify_is_monotonic() {
        let mut previous = classify(-10.0);
        let mut value = -10.0;
        while value <= 600.0 {
            let current = classify(value);
            assert!(
                current >= previous,
                "classify({}) = {:?} is less severe than {:?}",
                value,
                current,
                previous
            );
            previous = current;
            value += 0.25;
        }
        assert_eq!(previous, AqiCategory::Hazardous);
    }

    #[test]
    fn test_every_category_is_reachable() {
        for category in AqiCategory::ALL {
            let probe = category.upper_bound().unwrap_or(500.0);
            assert_eq!(classify(probe), category);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(AqiCategory::Good.to_string(), "🟢 Good");
        assert_eq!(
            AqiCategory::UnhealthySensitive.to_string(),
            "🟠 Unhealthy for Sensitive Groups"
        );
        assert_eq!(AqiCategory::Hazardous.to_string(), "⚫ Hazardous");
    }
}
