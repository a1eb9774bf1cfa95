//! Conversion of input values into serialized cell text
//!
//! A [`ValueConverters`] registry is an ordered list of [`ValueConverter`]s.
//! The first converter whose [`ValueConverter::can_apply`] accepts a value
//! converts it, so registration order is part of the contract. The default
//! order is number, date, null, then a catch-all string converter.

use crate::error::{ExcelError, Result};
use crate::types::{CellValue, ValueType};
use chrono::{DateTime, SecondsFormat, Utc};

/// Converts one family of input values into cell text
pub trait ValueConverter {
    /// Name used to find the converter in a registry
    fn name(&self) -> &str;

    /// Type of the cells this converter produces
    fn value_type(&self) -> ValueType;

    /// Whether this converter handles the value
    fn can_apply(&self, value: &CellValue) -> bool;

    /// Serialize the value; `None` means the cell has no value text
    fn convert(&self, value: &CellValue) -> Option<String>;
}

/// Finite integers and floats, written without locale formatting
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberConverter;

impl ValueConverter for NumberConverter {
    fn name(&self) -> &str {
        "number"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Number
    }

    fn can_apply(&self, value: &CellValue) -> bool {
        match value {
            CellValue::Int(_) => true,
            CellValue::Float(f) => f.is_finite(),
            _ => false,
        }
    }

    fn convert(&self, value: &CellValue) -> Option<String> {
        match value {
            CellValue::Int(i) => {
                let mut buf = itoa::Buffer::new();
                Some(buf.format(*i).to_string())
            }
            CellValue::Float(f) => Some(f.to_string()),
            _ => None,
        }
    }
}

/// Dates and timestamps, written as ISO-8601 UTC with milliseconds
#[derive(Debug, Clone, Copy, Default)]
pub struct DateConverter;

impl DateConverter {
    fn to_utc(value: &CellValue) -> Option<DateTime<Utc>> {
        match value {
            CellValue::Date(d) => d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()),
            CellValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl ValueConverter for DateConverter {
    fn name(&self) -> &str {
        "date"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Date
    }

    fn can_apply(&self, value: &CellValue) -> bool {
        matches!(value, CellValue::Date(_) | CellValue::DateTime(_))
    }

    fn convert(&self, value: &CellValue) -> Option<String> {
        Self::to_utc(value).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

/// Absent values become blank cells
#[derive(Debug, Clone, Copy, Default)]
pub struct NullConverter;

impl ValueConverter for NullConverter {
    fn name(&self) -> &str {
        "null"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Blank
    }

    fn can_apply(&self, value: &CellValue) -> bool {
        value.is_empty()
    }

    fn convert(&self, _value: &CellValue) -> Option<String> {
        None
    }
}

/// Catch-all: any value as its natural text
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyConverter;

impl ValueConverter for AnyConverter {
    fn name(&self) -> &str {
        "any"
    }

    fn value_type(&self) -> ValueType {
        ValueType::String
    }

    fn can_apply(&self, _value: &CellValue) -> bool {
        true
    }

    fn convert(&self, value: &CellValue) -> Option<String> {
        Some(value.to_string())
    }
}

/// Booleans as `1`/`0` boolean cells. Not part of the default registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanConverter;

impl ValueConverter for BooleanConverter {
    fn name(&self) -> &str {
        "boolean"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Boolean
    }

    fn can_apply(&self, value: &CellValue) -> bool {
        matches!(value, CellValue::Bool(_))
    }

    fn convert(&self, value: &CellValue) -> Option<String> {
        match value {
            CellValue::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            _ => None,
        }
    }
}

/// Ordered converter registry
pub struct ValueConverters {
    converters: Vec<Box<dyn ValueConverter>>,
}

impl ValueConverters {
    /// Registry without any converter
    pub fn empty() -> Self {
        ValueConverters {
            converters: Vec::new(),
        }
    }

    /// Append a converter after the existing ones
    pub fn push<C: ValueConverter + 'static>(&mut self, converter: C) {
        self.converters.push(Box::new(converter));
    }

    /// Insert a converter at `index`, shifting later ones back
    ///
    /// `index` is clamped to the registry length.
    pub fn insert<C: ValueConverter + 'static>(&mut self, index: usize, converter: C) {
        let index = index.min(self.converters.len());
        self.converters.insert(index, Box::new(converter));
    }

    /// Remove the first converter with the given name
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn ValueConverter>> {
        let pos = self.converters.iter().position(|c| c.name() == name)?;
        Some(self.converters.remove(pos))
    }

    /// Converter names in dispatch order
    pub fn names(&self) -> Vec<&str> {
        self.converters.iter().map(|c| c.name()).collect()
    }

    /// Convert a value with the first applicable converter
    pub fn convert(&self, value: &CellValue) -> Result<(ValueType, Option<String>)> {
        self.converters
            .iter()
            .find(|c| c.can_apply(value))
            .map(|c| (c.value_type(), c.convert(value)))
            .ok_or_else(|| ExcelError::NoConverter(value.kind().to_string()))
    }
}

impl Default for ValueConverters {
    fn default() -> Self {
        let mut registry = ValueConverters::empty();
        registry.push(NumberConverter);
        registry.push(DateConverter);
        registry.push(NullConverter);
        registry.push(AnyConverter);
        registry
    }
}

impl std::fmt::Debug for ValueConverters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
