//! Workbook packaging
//!
//! This module turns buffered sheets into an xlsx package:
//! - XML rendering of every part
//! - A streaming ZIP writer that never seeks
//! - The workbook/sheet lifecycle

pub mod archive;
pub mod sheet;
pub mod styles_part;
pub mod workbook;
pub mod xml;
pub mod xml_writer;

pub use archive::{ArchiveSink, MemoryArchive, StreamingZipWriter};
pub use sheet::SheetDocument;
pub use styles_part::{DefaultStylesPart, StylesContext, StylesPart};
pub use workbook::WorkbookDocument;
