//! Workbook document: owns the archive and the workbook-scoped registries

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::archive::{ArchiveSink, StreamingZipWriter};
use super::sheet::SheetDocument;
use super::styles_part::{DefaultStylesPart, StylesContext, StylesPart};
use super::xml;
use crate::error::{ExcelError, Result};
use crate::format::{locale_formats, NumberFormatRegistry};
use crate::options::WorkbookOptions;
use crate::style::{FormatRef, Style, StyleRuleEngine};
use crate::value::ValueConverters;

/// Streaming workbook writer
///
/// Sheets are written one at a time: [`WorkbookDocument::sheet`] hands out a
/// [`SheetDocument`] that must be [ended](SheetDocument::end) before the next
/// sheet is requested or the workbook itself is ended.
///
/// # Examples
///
/// ```no_run
/// use sheetstream::{CellDef, Style, ValueType, WorkbookDocument};
///
/// let mut workbook = WorkbookDocument::create("report.xlsx")?;
/// workbook.add_style("header", Style::new().bold())?;
///
/// let mut sheet = workbook.sheet("Data")?;
/// sheet.add_style_rule("header", |row, _| row == 0)?;
/// sheet.write_row(["#", "Name"])?;
/// sheet.add_cell_value(1)?;
/// sheet.add_cell_value("Alice")?;
/// sheet.add_cell(CellDef::formula(ValueType::Number, "=A2*2"))?;
/// sheet.end()?;
///
/// workbook.end()?;
/// # Ok::<(), sheetstream::ExcelError>(())
/// ```
pub struct WorkbookDocument<S: ArchiveSink> {
    archive: S,
    options: WorkbookOptions,
    pub(super) converters: ValueConverters,
    pub(super) styles: StyleRuleEngine,
    formats: NumberFormatRegistry,
    pub(super) styles_part: Box<dyn StylesPart>,
    sheets: Vec<String>,
    active_sheet: Option<usize>,
}

impl WorkbookDocument<StreamingZipWriter<BufWriter<File>>> {
    /// Create a workbook file at `path`
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::create_with_options(path, WorkbookOptions::default())
    }

    /// Create a workbook file at `path` with explicit options
    pub fn create_with_options<P: AsRef<Path>>(path: P, options: WorkbookOptions) -> Result<Self> {
        let file = File::create(path)?;
        let writer = BufWriter::with_capacity(64 * 1024, file); // 64KB buffer
        Self::with_options(writer, options)
    }
}

impl<W: Write> WorkbookDocument<StreamingZipWriter<W>> {
    /// Stream a zipped workbook into `writer`
    pub fn new(writer: W) -> Result<Self> {
        Self::with_options(writer, WorkbookOptions::default())
    }

    /// Stream a zipped workbook into `writer` with explicit options
    pub fn with_options(writer: W, options: WorkbookOptions) -> Result<Self> {
        let zip =
            StreamingZipWriter::with_compression(writer, options.compression_level, options.created);
        Self::with_sink(zip, options)
    }
}

impl<S: ArchiveSink> WorkbookDocument<S> {
    /// Start a workbook over any archive sink
    ///
    /// The document properties and the (empty) shared strings part are
    /// written immediately.
    pub fn with_sink(archive: S, options: WorkbookOptions) -> Result<Self> {
        let formats = match options.locale.as_deref() {
            Some(locale) => NumberFormatRegistry::with_locale(locale_formats(locale)?.as_ref()),
            None => NumberFormatRegistry::new(),
        };

        let mut workbook = WorkbookDocument {
            archive,
            options,
            converters: ValueConverters::default(),
            styles: StyleRuleEngine::new(),
            formats,
            styles_part: Box::new(DefaultStylesPart),
            sheets: Vec::new(),
            active_sheet: None,
        };

        let app = xml::app(&workbook.options.application, &workbook.options.app_version);
        workbook.append_part("docProps/app.xml", app.as_bytes())?;
        let core = xml::core(&workbook.options.creator, &workbook.options.created);
        workbook.append_part("docProps/core.xml", core.as_bytes())?;
        workbook.append_part("xl/sharedStrings.xml", xml::shared_strings().as_bytes())?;
        workbook.append_part("_rels/.rels", xml::rels().as_bytes())?;

        Ok(workbook)
    }

    /// Register a named style
    ///
    /// Format codes are assigned their number format id right away.
    pub fn add_style(&mut self, name: &str, style: Style) -> Result<()> {
        self.styles.add_style(name, style.clone())?;
        if let Some(FormatRef::Code(code)) = &style.format {
            self.formats.get_id(code);
        }
        Ok(())
    }

    /// Id of a number format code, assigned on first use
    pub fn number_format_id(&mut self, format_code: &str) -> u32 {
        self.formats.get_id(format_code)
    }

    /// Number format registry
    pub fn number_formats(&self) -> &NumberFormatRegistry {
        &self.formats
    }

    /// Converter registry; reorder or extend it before writing cells
    pub fn converters_mut(&mut self) -> &mut ValueConverters {
        &mut self.converters
    }

    /// Style and rule state
    pub fn style_engine(&self) -> &StyleRuleEngine {
        &self.styles
    }

    /// Style and rule state, for setup outside a sheet
    pub fn style_engine_mut(&mut self) -> &mut StyleRuleEngine {
        &mut self.styles
    }

    /// Replace the materializer of `xl/styles.xml`
    pub fn set_styles_part<P: StylesPart + 'static>(&mut self, part: P) {
        self.styles_part = Box::new(part);
    }

    /// Options the workbook was created with
    pub fn options(&self) -> &WorkbookOptions {
        &self.options
    }

    /// Names of all sheets started so far, in order
    pub fn sheet_names(&self) -> &[String] {
        &self.sheets
    }

    /// Name of the sheet currently being written
    pub fn active_sheet(&self) -> Option<&str> {
        self.active_sheet.map(|i| self.sheets[i].as_str())
    }

    /// Start the next sheet
    ///
    /// Fails with [`ExcelError::SheetAlreadyOpen`] while a previous sheet has
    /// not been ended.
    pub fn sheet(&mut self, name: &str) -> Result<SheetDocument<'_, S>> {
        if let Some(open) = self.active_sheet {
            return Err(ExcelError::SheetAlreadyOpen {
                open: self.sheets[open].clone(),
                requested: name.to_string(),
            });
        }

        self.sheets.push(name.to_string());
        let index = self.sheets.len();
        self.active_sheet = Some(index - 1);
        log::debug!("sheet {} '{}' opened", index, name);

        Ok(SheetDocument::new(self, name.to_string(), index))
    }

    pub(super) fn release_sheet(&mut self) {
        self.active_sheet = None;
    }

    pub(super) fn append_part(&mut self, part_name: &str, content: &[u8]) -> Result<()> {
        log::trace!("append part {} ({} bytes)", part_name, content.len());
        self.archive.append(part_name, content)
    }

    /// Write the workbook-level parts and finalize the archive
    ///
    /// Returns what the sink produces, e.g. the underlying writer for the
    /// default zip sink. Fails with [`ExcelError::SheetOpen`] while a sheet
    /// has not been ended.
    pub fn end(mut self) -> Result<S::Output> {
        if let Some(open) = self.active_sheet {
            return Err(ExcelError::SheetOpen(self.sheets[open].clone()));
        }

        let content_types = xml::content_types(&self.sheets);
        self.append_part("[Content_Types].xml", content_types.as_bytes())?;
        let rels = xml::workbook_rels(&self.sheets);
        self.append_part("xl/_rels/workbook.xml.rels", rels.as_bytes())?;
        let workbook = xml::workbook(&self.sheets);
        self.append_part("xl/workbook.xml", workbook.as_bytes())?;

        let styles = self
            .styles_part
            .render(&StylesContext::new(&self.styles, &self.formats));
        self.append_part("xl/styles.xml", styles.as_bytes())?;

        log::debug!(
            "workbook finalized with {} sheet(s), {} style signature(s)",
            self.sheets.len(),
            self.styles.signatures().len()
        );
        self.archive.finalize()
    }
}

impl<S: ArchiveSink> std::fmt::Debug for WorkbookDocument<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkbookDocument")
            .field("sheets", &self.sheets)
            .field("active_sheet", &self.active_sheet())
            .field("converters", &self.converters)
            .field("styles", &self.styles)
            .finish()
    }
}
