//! Sample extraction engine for TPM test workbooks
//!
//! `ExcelProcessor` owns the open workbook and the selected worksheet. Loading
//! a file and selecting a sheet are the only operations that change its
//! state; every query re-reads the cells it needs, so results are never
//! cached between calls.

use super::detection::{
    LEGACY_CHECK_COLUMNS, has_twelve_column_headers, is_user_test_simulation,
    template_from_sheet_names,
};
use super::metadata::extract_metadata;
use super::row_processing::{column_headers, extract_data_rows};
use super::structure::{HEADER_ROW, block_start, samples_in_width};
use super::utils::{read_cell, text_or_empty};
use crate::common::{TemplateVersion, WorkbookError};
use crate::external::{CalamineOpener, Workbook, WorkbookOpener, Worksheet};
use crate::services::models::SampleData;
use std::path::{Path, PathBuf};

pub struct ExcelProcessor {
    opener: Box<dyn WorkbookOpener>,
    workbook: Option<Box<dyn Workbook>>,
    worksheet: Option<Box<dyn Worksheet>>,
    file_path: Option<PathBuf>,
    current_sheet: Option<String>,
    last_error: Option<String>,
}

impl Default for ExcelProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ExcelProcessor {
    /// Engine reading files through calamine
    pub fn new() -> Self {
        Self::with_opener(CalamineOpener)
    }

    pub fn with_opener(opener: impl WorkbookOpener + 'static) -> Self {
        Self {
            opener: Box::new(opener),
            workbook: None,
            worksheet: None,
            file_path: None,
            current_sheet: None,
            last_error: None,
        }
    }

    /// Open a workbook, releasing any previous one, and select its first sheet
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), WorkbookError> {
        let path = path.as_ref();
        tracing::debug!("Loading file: {}", path.display());

        self.close_file();

        let result = self.open_workbook(path);
        self.record(result)?;

        let sheet_names = self.sheet_names();
        tracing::debug!("Available sheets: {}", sheet_names.join(","));

        if let Some(first) = sheet_names.first() {
            // A broken first sheet leaves the file loaded; callers can pick another
            if let Err(e) = self.select_sheet(first) {
                tracing::warn!("Could not auto-select first sheet: {e}");
            }
        }

        Ok(())
    }

    fn open_workbook(&mut self, path: &Path) -> Result<(), WorkbookError> {
        let metadata = std::fs::metadata(path).map_err(|_| WorkbookError::NotFound {
            path: path.to_path_buf(),
        })?;
        if !metadata.is_file() {
            return Err(WorkbookError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let workbook = self.opener.open(path)?;
        self.workbook = Some(workbook);
        self.file_path = Some(path.to_path_buf());
        tracing::debug!("File loaded successfully");
        Ok(())
    }

    /// Release the workbook and forget the selected sheet
    pub fn close_file(&mut self) {
        tracing::debug!("Closing file");
        self.worksheet = None;
        self.workbook = None;
        self.file_path = None;
        self.current_sheet = None;
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn current_sheet(&self) -> Option<&str> {
        self.current_sheet.as_deref()
    }

    /// Message of the most recent failed load or selection
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn sheet_names(&self) -> Vec<String> {
        match &self.workbook {
            Some(workbook) => workbook.sheet_names(),
            None => {
                tracing::warn!("No document loaded, cannot get sheet names");
                Vec::new()
            }
        }
    }

    /// Make `name` the active sheet; the previous selection survives a failure
    pub fn select_sheet(&mut self, name: &str) -> Result<(), WorkbookError> {
        tracing::debug!("Selecting sheet: {name}");

        let result = match self.workbook.as_mut() {
            None => Err(WorkbookError::NoDocument),
            Some(workbook) if !workbook.sheet_names().iter().any(|sheet| sheet == name) => {
                Err(WorkbookError::SheetNotFound {
                    sheet: name.to_string(),
                })
            }
            Some(workbook) => workbook.worksheet(name),
        };
        let worksheet = self.record(result)?;

        self.worksheet = Some(worksheet);
        self.current_sheet = Some(name.to_string());
        tracing::debug!(
            "Sheet selected successfully, sample count: {}",
            self.sample_count()
        );
        Ok(())
    }

    fn record<T>(&mut self, result: Result<T, WorkbookError>) -> Result<T, WorkbookError> {
        if let Err(e) = &result {
            tracing::error!("{e}");
            self.last_error = Some(e.to_string());
        }
        result
    }

    /// Template version of the loaded workbook, `Unknown` until a sheet is selected
    pub fn detect_template_version(&self) -> TemplateVersion {
        if self.worksheet.is_none() {
            return TemplateVersion::Unknown;
        }
        template_from_sheet_names(&self.sheet_names())
    }

    /// True for a User Test Simulation sheet still in the legacy 8-column layout.
    ///
    /// Such sheets must not be extracted; other sheets always report `false`.
    pub fn is_deprecated_user_test_simulation(&self) -> bool {
        let (Some(sheet), Some(name)) = (self.worksheet.as_deref(), self.current_sheet.as_deref())
        else {
            return false;
        };
        if !is_user_test_simulation(name) {
            return false;
        }

        let headers: Vec<String> = LEGACY_CHECK_COLUMNS
            .map(|col| text_or_empty(read_cell(sheet, HEADER_ROW, col).as_ref()))
            .collect();

        if has_twelve_column_headers(&headers) {
            tracing::debug!("User Test Simulation is using the current 12-column format");
            false
        } else {
            tracing::warn!("Detected deprecated 8-column User Test Simulation format");
            true
        }
    }

    /// Number of complete 12-column sample blocks on the active sheet
    pub fn sample_count(&self) -> usize {
        self.worksheet.as_deref().map_or(0, |sheet| {
            let columns = sheet.dimension().columns;
            let count = samples_in_width(columns);
            tracing::debug!("Total columns: {columns}, sample count: {count}");
            count
        })
    }

    /// Extract one sample; an invalid index or missing sheet yields an empty sample
    pub fn sample(&self, index: usize) -> SampleData {
        let Some(sheet) = self.worksheet.as_deref() else {
            tracing::warn!("No worksheet loaded");
            return SampleData::default();
        };
        if index >= self.sample_count() {
            tracing::warn!("Invalid sample index: {index}");
            return SampleData::default();
        }

        let start_column = block_start(index);
        let metadata = extract_metadata(sheet, index, self.detect_template_version());
        let data_rows = extract_data_rows(sheet, start_column);

        SampleData {
            metadata,
            data_rows,
            start_column,
        }
    }

    /// Every sample of the active sheet, in column order
    pub fn all_samples(&self) -> Vec<SampleData> {
        let count = self.sample_count();
        tracing::debug!("Extracting all {count} samples");
        (0..count).map(|index| self.sample(index)).collect()
    }

    /// The 12 header labels of row 4, always taken from the first block
    pub fn column_headers(&self) -> Vec<String> {
        self.worksheet
            .as_deref()
            .map(|sheet| column_headers(sheet))
            .unwrap_or_default()
    }
}
