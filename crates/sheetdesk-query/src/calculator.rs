//! Single-column calculations with a short history

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use sheetdesk_core::Grid;
use thiserror::Error;

use crate::classify::{classify_columns, numeric_values, NumericStats};

/// Number of calculations kept in a [`CalculationHistory`]
pub const HISTORY_LIMIT: usize = 10;

/// Aggregate operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Operation {
    Sum,
    Average,
    Count,
    Min,
    Max,
}

impl Operation {
    /// All operations in menu order
    pub const ALL: [Operation; 5] = [
        Operation::Sum,
        Operation::Average,
        Operation::Count,
        Operation::Min,
        Operation::Max,
    ];

    /// Upper-case label
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Sum => "SUM",
            Operation::Average => "AVG",
            Operation::Count => "COUNT",
            Operation::Min => "MIN",
            Operation::Max => "MAX",
        }
    }

    fn apply(&self, stats: &NumericStats) -> f64 {
        match self {
            Operation::Sum => stats.sum,
            Operation::Average => stats.avg,
            Operation::Count => stats.count as f64,
            Operation::Min => stats.min,
            Operation::Max => stats.max,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized operation name
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown operation: {0} (expected sum, avg, count, min or max)")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sum" => Ok(Operation::Sum),
            "avg" | "average" => Ok(Operation::Average),
            "count" => Ok(Operation::Count),
            "min" => Ok(Operation::Min),
            "max" => Ok(Operation::Max),
            _ => Err(UnknownOperation(s.to_string())),
        }
    }
}

/// A column offered to the calculator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorColumn {
    pub index: usize,
    pub header: String,
    /// Cells of the column that parse as numbers
    pub numeric_count: usize,
}

/// Columns the calculator can work on (the numeric ones)
pub fn calculator_columns(grid: &Grid) -> Vec<CalculatorColumn> {
    classify_columns(grid)
        .into_iter()
        .filter(|c| c.is_numeric())
        .map(|c| CalculatorColumn {
            index: c.index,
            numeric_count: c.numeric.map_or(0, |n| n.count),
            header: c.name,
        })
        .collect()
}

/// Result of one calculation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Calculation {
    pub operation: Operation,
    /// Header of the column
    pub column: String,
    pub result: f64,
    /// Values the result is based on
    pub count: usize,
}

/// Apply an operation to the numeric cells of a column
///
/// Cells that do not parse are skipped. Returns `None` when nothing parses.
pub fn calculate(grid: &Grid, column: usize, operation: Operation) -> Option<Calculation> {
    let values = numeric_values(grid, column);
    let stats = NumericStats::from_values(&values)?;
    Some(Calculation {
        operation,
        column: grid
            .header_cells()
            .get(column)
            .map(ToString::to_string)
            .unwrap_or_default(),
        result: operation.apply(&stats),
        count: stats.count,
    })
}

/// Most recent calculations, newest first
#[derive(Debug, Clone, Default)]
pub struct CalculationHistory {
    entries: VecDeque<Calculation>,
}

impl CalculationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a calculation, dropping the oldest past [`HISTORY_LIMIT`]
    pub fn push(&mut self, calculation: Calculation) {
        self.entries.push_front(calculation);
        self.entries.truncate(HISTORY_LIMIT);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Calculation> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
