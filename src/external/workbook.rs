//! Workbook accessor contract
//!
//! The extraction engine only ever talks to a spreadsheet through these
//! traits. Addresses handed to [`Worksheet::read`] are 1-based, matching the
//! A1 convention of the files themselves; the engine works zero-based and
//! translates at the call site.

use crate::common::WorkbookError;
use calamine::Data;
use std::path::Path;

/// Extent of a worksheet's used range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimension {
    pub rows: usize,
    pub columns: usize,
}

/// Opens workbooks from disk
pub trait WorkbookOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn Workbook>, WorkbookError>;
}

/// An open workbook, exclusively owned by whoever opened it
pub trait Workbook {
    /// Sheet names in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Load a sheet by exact name
    fn worksheet(&mut self, name: &str) -> Result<Box<dyn Worksheet>, WorkbookError>;
}

/// Read-only view over the cells of one sheet
pub trait Worksheet {
    /// Raw value at a 1-based `(row, col)` address, `None` when the cell is absent
    fn read(&self, row: u32, col: u32) -> Option<Data>;

    fn dimension(&self) -> Dimension;
}
