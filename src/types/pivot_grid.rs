//! The month × day-of-month heatmap table.

use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

/// One populated heatmap cell, the serialized form of a [`PivotGrid`] entry.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct PivotCell {
    pub month: u32,
    pub day: u32,
    pub mean_aqi: f64,
}

/// Mean AQI per `(month, day-of-month)` cell, readings from different years merged.
///
/// Only cells with at least one contributing reading are stored, so a missing cell
/// ([`PivotGrid::get`] returning `None`) is distinct from a mean of zero.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct PivotGrid {
    cells: BTreeMap<(u32, u32), f64>,
}

impl PivotGrid {
    pub(crate) fn from_cells(cells: impl IntoIterator<Item = ((u32, u32), f64)>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    pub fn get(&self, month: u32, day: u32) -> Option<f64> {
        self.cells.get(&(month, day)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Populated cells in `(month, day)` order.
    pub fn cells(&self) -> impl Iterator<Item = ((u32, u32), f64)> + '_ {
        self.cells.iter().map(|(key, value)| (*key, *value))
    }

    /// Months with at least one populated cell, ascending. These are the heatmap rows.
    pub fn months(&self) -> Vec<u32> {
        self.cells
            .keys()
            .map(|(month, _)| *month)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Days of month with at least one populated cell, ascending. These are the heatmap columns.
    pub fn days(&self) -> Vec<u32> {
        self.cells
            .keys()
            .map(|(_, day)| *day)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Dense `months() × days()` matrix, `None` where a cell has no data.
    pub fn rows(&self) -> Vec<(u32, Vec<Option<f64>>)> {
        let days = self.days();
        self.months()
            .into_iter()
            .map(|month| {
                let row = days.iter().map(|day| self.get(month, *day)).collect();
                (month, row)
            })
            .collect()
    }
}

// Tuple keys are not valid JSON object keys, so the grid serializes as a list of cells.
impl Serialize for PivotGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.cells().map(|((month, day), mean_aqi)| PivotCell {
            month,
            day,
            mean_aqi,
        }))
    }
}
