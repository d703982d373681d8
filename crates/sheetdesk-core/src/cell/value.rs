//! Cell value types

use std::fmt;

/// Represents the value stored in a grid cell
///
/// Uploaded sheets carry loosely-typed scalars. The variant records what the
/// decoder produced; whether a value is *numeric* is decided on read through
/// [`CellValue::as_number`], so a `Text("30")` cell counts as a number
/// everywhere a number is expected.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum CellValue {
    /// Absent value (missing cell, JSON `null`)
    #[default]
    Null,

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Numeric value
    Number(f64),

    /// Text value
    Text(String),
}

impl CellValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    /// Check if the cell is absent
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Check if the cell holds something other than null or an empty string
    pub fn is_present(&self) -> bool {
        match self {
            CellValue::Null => false,
            CellValue::Text(s) => !s.is_empty(),
            CellValue::Boolean(_) | CellValue::Number(_) => true,
        }
    }

    /// Attempt to read the value as a finite number
    ///
    /// Numbers are returned as-is, text goes through [`parse_number`].
    /// Booleans and nulls are never numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => parse_number(s),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a string slice
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Case-insensitive substring test against an already lower-cased needle
    ///
    /// Null cells never match, not even the empty needle.
    pub fn contains_folded(&self, folded_needle: &str) -> bool {
        match self {
            CellValue::Null => false,
            CellValue::Text(s) => s.to_lowercase().contains(folded_needle),
            other => other.to_string().to_lowercase().contains(folded_needle),
        }
    }

    /// Get the type name for messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Boolean(_) => "boolean",
            CellValue::Number(_) => "number",
            CellValue::Text(_) => "text",
        }
    }
}

/// Parse a string as a finite number
///
/// Surrounding whitespace is ignored. Empty strings, `NaN` and infinities do
/// not count as numbers.
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, ""),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Number(n) => write_number(f, *n),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Plain decimals between 1e-6 and 1e21, exponent form (`1e+21`, `1.5e-7`)
/// outside that range. Negative zero prints as `0`.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n == 0.0 {
        return write!(f, "0");
    }
    if (1e-6..1e21).contains(&n.abs()) || !n.is_finite() {
        return write!(f, "{}", n);
    }
    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => {
            write!(f, "{}e+{}", mantissa, power)
        }
        _ => write!(f, "{}", exp),
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}
