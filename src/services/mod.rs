pub mod models;
pub mod processing;

pub use models::{SampleData, SampleMetadata};
pub use processing::ExcelProcessor;
