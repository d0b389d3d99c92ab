//! In-memory workbook accessor
//!
//! Serves cell grids that are already decoded, e.g. fixtures in tests or data
//! handed over by another reader. The used range is measured from A1 to the
//! last non-empty cell, the way spreadsheet writers record it.

use super::workbook::{Dimension, Workbook, WorkbookOpener, Worksheet};
use crate::common::WorkbookError;
use calamine::Data;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<(String, Vec<Vec<Data>>)>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet; rows are zero-based, row 0 is spreadsheet row 1
    #[must_use]
    pub fn with_sheet(mut self, name: &str, rows: Vec<Vec<Data>>) -> Self {
        self.sheets.push((name.to_string(), rows));
        self
    }
}

impl Workbook for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn worksheet(&mut self, name: &str) -> Result<Box<dyn Worksheet>, WorkbookError> {
        self.sheets
            .iter()
            .find(|(sheet, _)| sheet == name)
            .map(|(_, rows)| Box::new(MemoryWorksheet::new(rows.clone())) as Box<dyn Worksheet>)
            .ok_or_else(|| WorkbookError::SheetNotFound {
                sheet: name.to_string(),
            })
    }
}

/// Opener that hands out a copy of the same workbook for any path
#[derive(Debug, Clone)]
pub struct MemoryOpener {
    workbook: MemoryWorkbook,
}

impl MemoryOpener {
    pub fn new(workbook: MemoryWorkbook) -> Self {
        Self { workbook }
    }
}

impl WorkbookOpener for MemoryOpener {
    fn open(&self, _path: &Path) -> Result<Box<dyn Workbook>, WorkbookError> {
        Ok(Box::new(self.workbook.clone()))
    }
}

#[derive(Debug, Clone)]
pub struct MemoryWorksheet {
    rows: Vec<Vec<Data>>,
    dimension: Dimension,
}

impl MemoryWorksheet {
    pub fn new(rows: Vec<Vec<Data>>) -> Self {
        let mut dimension = Dimension::default();
        for (row_idx, row) in rows.iter().enumerate() {
            if let Some(last_col) = row.iter().rposition(|cell| !matches!(cell, Data::Empty)) {
                dimension.rows = row_idx + 1;
                dimension.columns = dimension.columns.max(last_col + 1);
            }
        }
        Self { rows, dimension }
    }
}

impl Worksheet for MemoryWorksheet {
    fn read(&self, row: u32, col: u32) -> Option<Data> {
        let row = usize::try_from(row).ok()?.checked_sub(1)?;
        let col = usize::try_from(col).ok()?.checked_sub(1)?;
        match self.rows.get(row)?.get(col)? {
            Data::Empty => None,
            value => Some(value.clone()),
        }
    }

    fn dimension(&self) -> Dimension {
        self.dimension
    }
}
