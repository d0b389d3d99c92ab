pub mod calamine_reader;
pub mod memory;
pub mod workbook;

pub use calamine_reader::CalamineOpener;
pub use memory::{MemoryOpener, MemoryWorkbook};
pub use workbook::{Dimension, Workbook, WorkbookOpener, Worksheet};
