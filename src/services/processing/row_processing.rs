//! Row-by-row extraction of sample data blocks
//!
//! Data rows sit directly under the header row and are assumed contiguous:
//! the scan stops at the first row whose 12 cells are all blank, so rows
//! further down are never inspected even when they hold values.

use super::structure::{COLUMNS_PER_SAMPLE, DATA_START_ROW, HEADER_ROW};
use super::utils::{is_blank, read_cell, text_or_empty};
use crate::external::Worksheet;
use calamine::Data;

/// Read the 12 cells of one block row; absent cells become `Data::Empty`
pub fn extract_row(sheet: &dyn Worksheet, row: usize, start_col: usize) -> Vec<Data> {
    (start_col..start_col + COLUMNS_PER_SAMPLE)
        .map(|col| read_cell(sheet, row, col).unwrap_or(Data::Empty))
        .collect()
}

/// A row is empty when every cell is absent or blank text
pub fn is_empty_row(row: &[Data]) -> bool {
    row.iter().all(|cell| is_blank(Some(cell)))
}

/// Collect the contiguous data rows of the block starting at `start_col`
pub fn extract_data_rows(sheet: &dyn Worksheet, start_col: usize) -> Vec<Vec<Data>> {
    let max_rows = sheet.dimension().rows;

    let rows: Vec<Vec<Data>> = (DATA_START_ROW..max_rows)
        .map(|row| extract_row(sheet, row, start_col))
        .take_while(|row| !is_empty_row(row))
        .collect();

    tracing::debug!(
        "Extracted {} data rows for block at column {start_col}",
        rows.len()
    );
    rows
}

/// Header texts of the first block; other blocks are assumed to share them
pub fn column_headers(sheet: &dyn Worksheet) -> Vec<String> {
    let headers: Vec<String> = (0..COLUMNS_PER_SAMPLE)
        .map(|col| text_or_empty(read_cell(sheet, HEADER_ROW, col).as_ref()))
        .collect();

    tracing::debug!(
        "Extracted {} column headers: {}",
        headers.len(),
        headers.join(", ")
    );
    headers
}
