//! Chart options

/// Default cap on points in a chart
pub const DEFAULT_MAX_ITEMS: usize = 10;

/// Options for chart data and chartable-column detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOptions {
    /// Maximum number of points (default: 10)
    pub max_items: usize,
    /// Data rows sampled per column by detection (default: 10)
    pub sample_rows: usize,
    /// Minimum numeric fraction of sampled values (default: 0.7)
    pub numeric_threshold: f64,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            sample_rows: 10,
            numeric_threshold: 0.7,
        }
    }
}

impl ChartOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the point cap
    pub fn max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }
}

/// Options for the dashboard chart plan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardOptions {
    /// Maximum number of charts (default: 4)
    pub max_charts: usize,
    /// Points per bar chart (default: 8)
    pub bar_items: usize,
    /// Points in the pie chart (default: 6)
    pub pie_items: usize,
    /// Category columns paired with values (default: 2)
    pub category_columns: usize,
    /// Value columns paired with categories (default: 3)
    pub value_columns: usize,
    /// Detection settings
    pub detection: ChartOptions,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            max_charts: 4,
            bar_items: 8,
            pie_items: 6,
            category_columns: 2,
            value_columns: 3,
            detection: ChartOptions::default(),
        }
    }
}
