//! # sheetdesk-chart
//!
//! Chart data for sheetdesk: category/value aggregation, sampling-based
//! chartable-column detection and the dashboard chart plan.
//!
//! Rendering is left to the caller; a [`Chart`] is only a type, a title and
//! a list of [`ChartPoint`]s.

mod chart;
mod dashboard;
mod detect;
mod options;
mod series;

pub use chart::{Chart, ChartType};
pub use dashboard::{dashboard_charts, uploads_over_time};
pub use detect::{detect_chartable_columns, detect_chartable_columns_with, ChartableColumns};
pub use options::{ChartOptions, DashboardOptions, DEFAULT_MAX_ITEMS};
pub use series::{chart_data, chart_data_with, ChartPoint};
