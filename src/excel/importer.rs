//! Spreadsheet reader - Excel (.xlsx) → string rows

use crate::core::coerce::format_canonical;
use crate::error::{TabError, TabResult};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read-only view of an .xlsx workbook
pub struct SpreadsheetReader {
    path: PathBuf,
    workbook: Xlsx<BufReader<File>>,
}

impl SpreadsheetReader {
    /// Open an Excel workbook
    pub fn open<P: AsRef<Path>>(path: P) -> TabResult<Self> {
        let path = path.as_ref().to_path_buf();
        let workbook: Xlsx<_> = open_workbook(&path)?;
        debug!(path = %path.display(), "Opened workbook");
        Ok(Self { path, workbook })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// Rows of the named sheet, or of the first sheet when `sheet` is `None`
    pub fn rows(&mut self, sheet: Option<&str>) -> TabResult<SheetRows> {
        let names = self.sheet_names();
        let name = match sheet {
            Some(wanted) => names
                .iter()
                .find(|n| n.as_str() == wanted)
                .cloned()
                .ok_or_else(|| TabError::SheetNotFound(wanted.to_string()))?,
            None => names
                .first()
                .cloned()
                .ok_or_else(|| TabError::SheetNotFound("(first sheet)".to_string()))?,
        };

        let range = self.workbook.worksheet_range(&name)?;
        let (height, width) = range.get_size();
        debug!(sheet = %name, height, width, "Loaded sheet");

        Ok(SheetRows::new(range))
    }
}

/// Forward-only iterator over a sheet's rows as string cells.
///
/// The header row is cut after its last non-empty cell; data rows span the
/// full used width of the sheet.
#[derive(Debug)]
pub struct SheetRows {
    range: Range<Data>,
    next_row: usize,
}

impl SheetRows {
    fn new(range: Range<Data>) -> Self {
        Self { range, next_row: 0 }
    }

    fn header_width(&self) -> usize {
        (0..self.range.width())
            .rev()
            .find(|&col| !matches!(self.range.get((0, col)), None | Some(Data::Empty)))
            .map_or(0, |col| col + 1)
    }
}

impl Iterator for SheetRows {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.next_row;
        if row >= self.range.height() {
            return None;
        }
        self.next_row += 1;

        let width = if row == 0 {
            self.header_width()
        } else {
            self.range.width()
        };

        Some(
            (0..width)
                .map(|col| self.range.get((row, col)).map(cell_to_string).unwrap_or_default())
                .collect(),
        )
    }
}

/// Render a cell the way it reads in the sheet
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| format_canonical(&d))
            .unwrap_or_else(|| dt.as_f64().to_string()),
        Data::Error(e) => e.to_string(),
    }
}
