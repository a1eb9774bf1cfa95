//! Error types for the sheetstream library

use thiserror::Error;

/// Result type alias for sheetstream operations
pub type Result<T> = std::result::Result<T, ExcelError>;

/// Main error type for all workbook operations
///
/// Every variant except [`ExcelError::IoError`] and [`ExcelError::WriteError`]
/// is an API usage error detected at the call that triggered it. None of them
/// are transient; the document under construction should be discarded.
#[derive(Error, Debug)]
pub enum ExcelError {
    /// A style was registered twice under the same name
    #[error("Style '{0}' is already defined")]
    DuplicateStyle(String),

    /// A rule or cell referenced a style that was never registered
    #[error("Style '{0}' is not defined")]
    UnknownStyle(String),

    /// `sheet()` was called while another sheet is still being written
    #[error("Cannot open sheet '{requested}': sheet '{open}' is still being written")]
    SheetAlreadyOpen { open: String, requested: String },

    /// The workbook was ended while a sheet is still being written
    #[error("Cannot end workbook: sheet '{0}' is still being written")]
    SheetOpen(String),

    /// A sheet was used after `end()`
    #[error("Sheet '{0}' has already been ended")]
    SheetClosed(String),

    /// No registered converter accepted the value
    #[error("No value converter applies to {0}")]
    NoConverter(String),

    /// No built-in number format table exists for the locale
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    /// Error occurred while writing the package
    #[error("Failed to write package: {0}")]
    WriteError(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for ExcelError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io) => ExcelError::IoError(io),
            other => ExcelError::WriteError(other.to_string()),
        }
    }
}
