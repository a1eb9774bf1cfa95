//! # sheetstream
//!
//! A streaming writer for Excel (xlsx) workbooks.
//!
//! ## Features
//!
//! - **Streaming Write**: parts go to the output as soon as they are complete,
//!   the ZIP container is written without seeking
//! - **Typed Values**: an ordered, extensible converter registry turns values
//!   into cell text and cell type
//! - **Rule-based Styles**: named styles applied by `(row, col)` predicates,
//!   deduplicated into a compact style table
//! - **Number Formats**: built-in OOXML format ids plus custom format codes
//! - **Formulas**: typed formula cells without cached values
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sheetstream::{CellDef, Style, ValueType, WorkbookDocument};
//! use chrono::NaiveDate;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut workbook = WorkbookDocument::create("output.xlsx")?;
//! workbook.add_style("header", Style::new().bold())?;
//!
//! let mut sheet = workbook.sheet("Sheet1")?;
//! sheet.add_style_rule("header", |row, _| row == 0)?;
//!
//! // Write header
//! sheet.write_row(["#", "Date", "Amount"])?;
//!
//! // Write data rows with typed values
//! sheet.add_cell_value(1)?;
//! sheet.add_cell_value(NaiveDate::from_ymd_opt(2019, 4, 1).unwrap())?;
//! sheet.add_cell_value(12.5)?;
//! sheet.next_row()?;
//!
//! // Write with formulas
//! sheet.skip_cells(2)?;
//! sheet.add_cell(CellDef::formula(ValueType::Number, "=SUM(C2:C2)"))?;
//!
//! sheet.end()?;
//! workbook.end()?;
//! # Ok(())
//! # }
//! ```

pub mod cell_ref;
pub mod error;
pub mod format;
pub mod options;
pub mod package;
pub mod style;
pub mod types;
pub mod value;

pub use cell_ref::{cell_ref, col_to_letters};
pub use error::{ExcelError, Result};
pub use format::{NumberFormat, NumberFormatRegistry};
pub use options::WorkbookOptions;
pub use package::{
    ArchiveSink, DefaultStylesPart, MemoryArchive, SheetDocument, StreamingZipWriter,
    StylesContext, StylesPart, WorkbookDocument,
};
pub use style::{
    BorderStyle, FillStyle, FontStyle, FormatRef, HorizontalAlignment, LineStyle, LineType, Style,
    StyleRuleEngine, VerticalAlignment,
};
pub use types::{Cell, CellDef, CellValue, Row, ValueType};
pub use value::{ValueConverter, ValueConverters};
