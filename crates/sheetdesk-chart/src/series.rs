//! Category/value aggregation

use ahash::AHashMap;
use sheetdesk_core::Grid;

use crate::options::ChartOptions;

/// One named value of a chart series
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

impl ChartPoint {
    /// Create a new point
    pub fn new<S: Into<String>>(name: S, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Group data rows by the category column and sum the value column
///
/// Rows where either cell is null or empty are skipped. Values that do not
/// parse as numbers count as 0. Points are sorted by sum, largest first, and
/// cut to `max_items`; equal sums keep the order in which their category was
/// first seen.
pub fn chart_data(grid: &Grid, category: usize, value: usize, max_items: usize) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = Vec::new();
    let mut slots: AHashMap<String, usize> = AHashMap::new();

    for row in grid.data_rows() {
        let key_cell = row.cell(category);
        let value_cell = row.cell(value);
        if !key_cell.is_present() || !value_cell.is_present() {
            continue;
        }

        let key = key_cell.to_string();
        let amount = value_cell.as_number().unwrap_or(0.0);
        match slots.get(&key) {
            Some(&slot) => points[slot].value += amount,
            None => {
                slots.insert(key.clone(), points.len());
                points.push(ChartPoint::new(key, amount));
            }
        }
    }

    points.sort_by(|a, b| b.value.total_cmp(&a.value));
    points.truncate(max_items);
    points
}

/// [`chart_data`] capped at `options.max_items`
pub fn chart_data_with(
    grid: &Grid,
    category: usize,
    value: usize,
    options: &ChartOptions,
) -> Vec<ChartPoint> {
    chart_data(grid, category, value, options.max_items)
}
