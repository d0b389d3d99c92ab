//! Workbook accessor backed by calamine
//!
//! Handles every format `open_workbook_auto` understands (xlsx, xlsm, xlsb,
//! xls, ods). The whole sheet is decoded into a [`Range`] on selection, so
//! cell reads afterwards are plain lookups.

use super::workbook::{Dimension, Workbook, WorkbookOpener, Worksheet};
use crate::common::WorkbookError;
use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct CalamineOpener;

impl WorkbookOpener for CalamineOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn Workbook>, WorkbookError> {
        let sheets = open_workbook_auto(path).map_err(|e| {
            tracing::error!("Failed to open workbook {}: {e}", path.display());
            WorkbookError::OpenFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        Ok(Box::new(CalamineWorkbook { sheets }))
    }
}

pub struct CalamineWorkbook {
    sheets: Sheets<BufReader<File>>,
}

impl Workbook for CalamineWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn worksheet(&mut self, name: &str) -> Result<Box<dyn Worksheet>, WorkbookError> {
        if !self.sheets.sheet_names().iter().any(|sheet| sheet == name) {
            return Err(WorkbookError::SheetNotFound {
                sheet: name.to_string(),
            });
        }

        let range = self
            .sheets
            .worksheet_range(name)
            .map_err(|e| WorkbookError::SheetSelectionFailed {
                sheet: name.to_string(),
                message: e.to_string(),
            })?;

        Ok(Box::new(CalamineWorksheet { range }))
    }
}

pub struct CalamineWorksheet {
    range: Range<Data>,
}

impl Worksheet for CalamineWorksheet {
    fn read(&self, row: u32, col: u32) -> Option<Data> {
        if row == 0 || col == 0 {
            return None;
        }

        // Range lookups are absolute and zero-based
        match self.range.get_value((row - 1, col - 1)) {
            None | Some(Data::Empty) => None,
            Some(value) => Some(value.clone()),
        }
    }

    fn dimension(&self) -> Dimension {
        let (rows, columns) = self.range.get_size();
        Dimension { rows, columns }
    }
}
