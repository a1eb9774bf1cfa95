//! Type definitions for cells, rows and input values

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;

/// The kind of value a cell holds once it has been converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValueType {
    Number,
    Date,
    Boolean,
    String,
    Blank,
}

impl ValueType {
    /// Lowercase name used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Number => "number",
            ValueType::Date => "date",
            ValueType::Boolean => "boolean",
            ValueType::String => "string",
            ValueType::Blank => "blank",
        }
    }

    /// The `t` attribute written for a formula cell of this type
    pub fn formula_type_code(&self) -> &'static str {
        match self {
            ValueType::Number | ValueType::Blank => "n",
            ValueType::Date => "d",
            ValueType::Boolean => "b",
            ValueType::String => "str",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value supplied by the caller, before conversion
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Absent value
    Empty,
    /// String value
    String(String),
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Calendar date, treated as midnight UTC
    Date(NaiveDate),
    /// Point in time
    DateTime(DateTime<Utc>),
}

impl CellValue {
    /// Check if the value is absent
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Short description used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty value",
            CellValue::String(_) => "string",
            CellValue::Int(_) => "integer",
            CellValue::Float(_) => "float",
            CellValue::Bool(_) => "boolean",
            CellValue::Date(_) => "date",
            CellValue::DateTime(_) => "datetime",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::String(s) => f.write_str(s),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Date(d) => write!(f, "{}", d),
            CellValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&String> for CellValue {
    fn from(s: &String) -> Self {
        CellValue::String(s.clone())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i as i64)
    }
}

impl From<u32> for CellValue {
    fn from(i: u32) -> Self {
        CellValue::Int(i as i64)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<f32> for CellValue {
    /// Keeps the decimal the caller wrote: `0.1f32` stays `0.1`, not the
    /// widened `0.10000000149011612`
    fn from(f: f32) -> Self {
        CellValue::Float(f.to_string().parse().unwrap_or(f as f64))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(dt: DateTime<Utc>) -> Self {
        CellValue::DateTime(dt)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt.and_utc())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

/// Definition of a cell passed to `SheetDocument::add_cell`
///
/// A definition carries a value or a formula, never both. Building one with
/// [`CellDef::formula`] drops any value and vice versa.
#[derive(Debug, Clone, PartialEq)]
pub struct CellDef {
    /// Value routed through the converter registry
    pub value: Option<CellValue>,
    /// Formula text, written without a cached value
    pub formula: Option<String>,
    /// Declared type; overridden by the converter for value cells
    pub value_type: Option<ValueType>,
    /// Names of styles applied explicitly to this cell
    pub styles: Vec<String>,
}

impl CellDef {
    /// A cell holding a value
    pub fn value(value: impl Into<CellValue>) -> Self {
        CellDef {
            value: Some(value.into()),
            formula: None,
            value_type: None,
            styles: Vec::new(),
        }
    }

    /// A cell holding a formula whose result has the given type
    pub fn formula(value_type: ValueType, formula: impl Into<String>) -> Self {
        CellDef {
            value: None,
            formula: Some(formula.into()),
            value_type: Some(value_type),
            styles: Vec::new(),
        }
    }

    /// An empty cell
    pub fn blank() -> Self {
        CellDef {
            value: None,
            formula: None,
            value_type: Some(ValueType::Blank),
            styles: Vec::new(),
        }
    }

    /// Set the declared type
    pub fn with_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    /// Apply named styles to the cell
    pub fn with_styles<I, S>(mut self, styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.styles = styles.into_iter().map(Into::into).collect();
        self
    }
}

impl From<CellValue> for CellDef {
    fn from(value: CellValue) -> Self {
        CellDef::value(value)
    }
}

/// A converted cell buffered in a sheet
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Serialized value text
    pub value: Option<String>,
    /// Formula text
    pub formula: Option<String>,
    /// Type the cell is rendered as
    pub value_type: ValueType,
    /// Names of styles applied explicitly
    pub styles: Vec<String>,
    /// Index of the cell's style signature in the workbook's style table
    pub style_index: usize,
}

impl Cell {
    /// Create a blank cell
    pub fn blank(style_index: usize) -> Self {
        Cell {
            value: None,
            formula: None,
            value_type: ValueType::Blank,
            styles: Vec::new(),
            style_index,
        }
    }

    /// Check if the cell has neither value nor formula
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.formula.is_none()
    }
}

/// Represents a buffered row of cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    /// Row index (0-based)
    pub index: u32,
    /// Cells in this row, column 0 first
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create an empty row
    pub fn new(index: u32) -> Self {
        Row {
            index,
            cells: Vec::new(),
        }
    }

    /// Get cell at column index
    pub fn get(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }

    /// Get number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
