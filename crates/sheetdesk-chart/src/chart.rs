//! Chart types

use crate::series::ChartPoint;

/// Chart types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChartType {
    Bar,
    Line,
    Pie,
}

impl ChartType {
    /// Lower-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
        }
    }
}

/// Chart definition: a type, a title and one series of points
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chart {
    /// Chart type
    pub chart_type: ChartType,
    /// Chart title
    pub title: Option<String>,
    /// Points, in display order
    pub data: Vec<ChartPoint>,
}

impl Chart {
    /// Create a new chart
    pub fn new(chart_type: ChartType, data: Vec<ChartPoint>) -> Self {
        Self {
            chart_type,
            title: None,
            data,
        }
    }

    /// Set chart title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Check if the chart has no points
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
