use std::fmt;
use std::path::PathBuf;

/// Load-time failures raised while opening a workbook or selecting a sheet.
///
/// Extraction itself never fails; missing or malformed cells degrade to
/// default values instead of surfacing here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkbookError {
    /// The path does not exist on disk
    NotFound { path: PathBuf },
    /// The path exists but is a directory (or another non-file entry)
    NotAFile { path: PathBuf },
    /// The spreadsheet reader could not open or parse the file
    OpenFailed { path: PathBuf, message: String },
    /// A sheet operation was attempted before any workbook was loaded
    NoDocument,
    /// The requested sheet name is not part of the workbook
    SheetNotFound { sheet: String },
    /// The sheet exists but its cells could not be read
    SheetSelectionFailed { sheet: String, message: String },
}

impl fmt::Display for WorkbookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkbookError::NotFound { path } => {
                write!(f, "File does not exist: {}", path.display())
            }
            WorkbookError::NotAFile { path } => {
                write!(f, "Path is not a file: {}", path.display())
            }
            WorkbookError::OpenFailed { path, message } => {
                write!(f, "Failed to open workbook {}: {message}", path.display())
            }
            WorkbookError::NoDocument => write!(f, "No document loaded"),
            WorkbookError::SheetNotFound { sheet } => write!(f, "Sheet not found: {sheet}"),
            WorkbookError::SheetSelectionFailed { sheet, message } => {
                write!(f, "Failed to select sheet {sheet}: {message}")
            }
        }
    }
}

impl std::error::Error for WorkbookError {}
