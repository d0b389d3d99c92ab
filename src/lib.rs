//! Sample extraction for TPM test workbooks.
//!
//! A test workbook lays several device test runs side by side, one per
//! 12-column block. [`ExcelProcessor`] detects the template version, splits
//! the active sheet into blocks and extracts each block's metadata and data
//! rows.
//!
//! ```no_run
//! use tpm_sheets::ExcelProcessor;
//!
//! let mut processor = ExcelProcessor::new();
//! processor.load_file("run.xlsx")?;
//! if !processor.is_deprecated_user_test_simulation() {
//!     for sample in processor.all_samples() {
//!         println!("{}: {:.2} W", sample.metadata.sample_id, sample.metadata.power);
//!     }
//! }
//! # Ok::<(), tpm_sheets::WorkbookError>(())
//! ```

pub mod common;
pub mod config;
pub mod external;
pub mod services;

pub use common::{TemplateVersion, WorkbookError};
pub use services::{ExcelProcessor, SampleData, SampleMetadata};
