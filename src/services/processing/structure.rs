//! Fixed layout of TPM test sheets
//!
//! A sheet holds one sample per 12-column block. Rows 1-3 of each block carry
//! metadata whose positions depend on the template version, row 4 holds the
//! column headers and the data rows start on row 5. Everything here is
//! zero-based and relative to the first column of a block.

use crate::common::TemplateVersion;

pub const COLUMNS_PER_SAMPLE: usize = 12;
pub const HEADER_ROW: usize = 3;
pub const DATA_START_ROW: usize = 4;

/// Position of a metadata cell relative to the start of its block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellOffset {
    pub row: usize,
    pub col: usize,
}

const fn at(row: usize, col: usize) -> CellOffset {
    CellOffset { row, col }
}

/// Where each metadata field lives for one template version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataLayout {
    pub test_name: CellOffset,
    pub date: CellOffset,
    pub sample_id: CellOffset,
    /// `None` when the template has no heating technology field
    pub heating_technology: Option<CellOffset>,
    pub media: CellOffset,
    pub resistance: CellOffset,
    pub puffing_regime: CellOffset,
    pub viscosity: CellOffset,
    pub tester: CellOffset,
    pub voltage: CellOffset,
    pub initial_oil_mass: CellOffset,
}

/// January 2025 template
pub const OLD_TEMPLATE: MetadataLayout = MetadataLayout {
    test_name: at(0, 0),
    date: at(0, 3),
    sample_id: at(0, 6),
    heating_technology: None,
    media: at(1, 1),
    resistance: at(1, 3),
    puffing_regime: at(1, 8),
    viscosity: at(2, 1),
    tester: at(2, 3),
    voltage: at(2, 6),
    // Column M, which is the first column of the next block
    initial_oil_mass: at(2, 12),
};

/// December 2025 template
pub const NEW_TEMPLATE: MetadataLayout = MetadataLayout {
    test_name: at(0, 0),
    date: at(0, 2),
    sample_id: at(0, 4),
    heating_technology: Some(at(0, 5)),
    media: at(1, 0),
    resistance: at(1, 2),
    puffing_regime: at(2, 6),
    viscosity: at(2, 0),
    tester: at(2, 2),
    voltage: at(2, 4),
    initial_oil_mass: at(2, 7),
};

/// Layout for a template version; `Unknown` falls back to the old layout
pub fn metadata_layout(version: TemplateVersion) -> &'static MetadataLayout {
    match version {
        TemplateVersion::New => &NEW_TEMPLATE,
        TemplateVersion::Old | TemplateVersion::Unknown => &OLD_TEMPLATE,
    }
}

/// Zero-based first column of a sample block
pub fn block_start(sample_index: usize) -> usize {
    sample_index * COLUMNS_PER_SAMPLE
}

/// Number of complete sample blocks in a sheet `used_columns` wide
pub fn samples_in_width(used_columns: usize) -> usize {
    used_columns / COLUMNS_PER_SAMPLE
}
