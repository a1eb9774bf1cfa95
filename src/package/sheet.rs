//! Sheet document: buffers rows of one worksheet until it is ended

use super::archive::ArchiveSink;
use super::workbook::WorkbookDocument;
use super::xml;
use crate::error::{ExcelError, Result};
use crate::types::{Cell, CellDef, CellValue, Row, ValueType};

/// Worksheet being written
///
/// Borrows its workbook mutably, so only one sheet can be alive at a time.
/// Cells are appended left to right into the current row; rows are rendered
/// into `xl/worksheets/sheetN.xml` by [`SheetDocument::end`].
pub struct SheetDocument<'a, S: ArchiveSink> {
    book: &'a mut WorkbookDocument<S>,
    name: String,
    index: usize,
    rows: Vec<Row>,
    closed: bool,
}

impl<'a, S: ArchiveSink> SheetDocument<'a, S> {
    pub(super) fn new(book: &'a mut WorkbookDocument<S>, name: String, index: usize) -> Self {
        SheetDocument {
            book,
            name,
            index,
            rows: vec![Row::new(0)],
            closed: false,
        }
    }

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 1-based position of the sheet in the workbook
    pub fn index(&self) -> usize {
        self.index
    }

    /// Rows buffered so far, the open row last
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of buffered rows, including the open one
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(ExcelError::SheetClosed(self.name.clone()));
        }
        Ok(())
    }

    /// Position the next cell will take
    fn cursor(&self) -> (u32, u32) {
        match self.rows.last() {
            Some(row) => (row.index, row.cells.len() as u32),
            None => (0, 0),
        }
    }

    fn push_cell(&mut self, cell: Cell) {
        if let Some(row) = self.rows.last_mut() {
            row.cells.push(cell);
        }
    }

    /// Append a cell described by `def`
    ///
    /// Formulas keep their declared type (number when none is given). Values
    /// take the type of the converter that serialized them.
    pub fn add_cell(&mut self, def: CellDef) -> Result<()> {
        self.ensure_open()?;
        let (row, col) = self.cursor();

        let CellDef {
            value,
            formula,
            value_type,
            styles,
        } = def;

        let (value_type, value) = match (formula.is_some(), value) {
            (true, _) => (value_type.unwrap_or(ValueType::Number), None),
            (false, Some(value)) => self.book.converters.convert(&value)?,
            (false, None) => (value_type.unwrap_or(ValueType::Blank), None),
        };

        let style_index = self.book.styles.style_index_for_cell(row, col, &styles)?;

        self.push_cell(Cell {
            value,
            formula,
            value_type,
            styles,
            style_index,
        });
        Ok(())
    }

    /// Append a value, converted by the workbook's registry
    pub fn add_cell_value<V: Into<CellValue>>(&mut self, value: V) -> Result<()> {
        self.add_cell(CellDef::value(value))
    }

    /// Append `count` blank cells
    ///
    /// Blank cells still pick up the style of any matching rule.
    pub fn skip_cells(&mut self, count: usize) -> Result<()> {
        self.ensure_open()?;
        for _ in 0..count {
            let (row, col) = self.cursor();
            let style_index = self.book.styles.style_index_for(row, col);
            self.push_cell(Cell::blank(style_index));
        }
        Ok(())
    }

    /// Close the current row and open the next one
    pub fn next_row(&mut self) -> Result<()> {
        self.ensure_open()?;
        let next = self.rows.last().map_or(0, |row| row.index + 1);
        self.rows.push(Row::new(next));
        Ok(())
    }

    /// Call [`next_row`](Self::next_row) `count` times
    pub fn skip_rows(&mut self, count: usize) -> Result<()> {
        for _ in 0..count {
            self.next_row()?;
        }
        Ok(())
    }

    /// Append `values` to the current row, then move to the next row
    pub fn write_row<I, V>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.write_row_with_offset(0, values)
    }

    /// Like [`write_row`](Self::write_row), preceded by `offset` blank cells
    pub fn write_row_with_offset<I, V>(&mut self, offset: usize, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.skip_cells(offset)?;
        for value in values {
            self.add_cell_value(value)?;
        }
        self.next_row()
    }

    /// Apply a registered style wherever `predicate(row, col)` holds
    ///
    /// Rules live on the workbook and stay active for later sheets until
    /// [`reset_style_rules`](Self::reset_style_rules) is called.
    pub fn add_style_rule<F>(&mut self, name: &str, predicate: F) -> Result<()>
    where
        F: Fn(u32, u32) -> bool + 'static,
    {
        self.ensure_open()?;
        self.book.styles.add_rule(name, predicate)
    }

    /// Drop every active style rule
    pub fn reset_style_rules(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.book.styles.reset_rules();
        Ok(())
    }

    /// Render the buffered rows and append the worksheet part
    ///
    /// When the archive rejects the part the rows stay buffered and the
    /// sheet stays open, so `end` can be called again.
    pub fn end(&mut self) -> Result<()> {
        self.ensure_open()?;

        let markup = xml::sheet(&self.rows, self.book.styles_part.cell_style_refs());
        let part_name = xml::sheet_part_name(self.index);
        self.book.append_part(&part_name, markup.as_bytes())?;

        let row_count = self.rows.len();
        self.rows = Vec::new();
        self.closed = true;
        self.book.release_sheet();
        log::debug!(
            "sheet {} '{}' ended with {} row(s)",
            self.index,
            self.name,
            row_count
        );
        Ok(())
    }
}

impl<S: ArchiveSink> std::fmt::Debug for SheetDocument<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetDocument")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("rows", &self.rows.len())
            .field("closed", &self.closed)
            .finish()
    }
}
