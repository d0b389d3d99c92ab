use crate::services::processing::utils::cell_text;
use calamine::Data;
use serde::{Serialize, Serializer};

/// Identification and test-condition fields of one sample block
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleMetadata {
    pub test_name: String,
    pub date: String,
    pub sample_id: String,
    pub media: String,
    pub resistance: f64,
    pub voltage: f64,
    /// Derived from voltage, resistance and heating technology at extraction
    pub power: f64,
    pub viscosity: f64,
    pub tester: String,
    pub puffing_regime: String,
    pub initial_oil_mass: f64,
    /// Empty for old-template sheets
    pub heating_technology: String,
}

/// One 12-column sample block: its metadata and the data rows under the header
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleData {
    pub metadata: SampleMetadata,
    /// Row x column, always 12 cells per row; absent cells are `Data::Empty`
    #[serde(serialize_with = "serialize_rows")]
    pub data_rows: Vec<Vec<Data>>,
    /// Zero-based index of the block's first column
    pub start_column: usize,
}

impl SampleData {
    pub fn row_count(&self) -> usize {
        self.data_rows.len()
    }
}

fn serialize_rows<S: Serializer>(rows: &[Vec<Data>], serializer: S) -> Result<S::Ok, S::Error> {
    let rendered: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    rendered.serialize(serializer)
}
