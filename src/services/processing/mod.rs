//! Template-aware extraction of TPM sample blocks
//!
//! `structure` fixes the sheet geometry, `detection` classifies workbooks and
//! legacy sheets, `metadata` and `row_processing` read one block, and
//! `excel_processor` ties them to an open workbook.

pub mod detection;
pub mod excel_processor;
pub mod metadata;
pub mod row_processing;
pub mod structure;
pub mod utils;

pub use excel_processor::ExcelProcessor;
