//! Sample metadata extraction and power derivation

use super::detection::contains_ignore_case;
use super::structure::{CellOffset, block_start, metadata_layout};
use super::utils::{f64_or_zero, read_cell, text_or_empty};
use crate::common::TemplateVersion;
use crate::external::Worksheet;
use crate::services::models::SampleMetadata;

/// Coil resistance correction for T51 heaters (ohm)
pub const T51_RESISTANCE_OFFSET: f64 = 0.25;
/// Coil resistance correction for T58G and CCELL 3.0 heaters (ohm)
pub const T58G_RESISTANCE_OFFSET: f64 = 0.78;

/// Resistance correction implied by the heating technology label
pub fn resistance_offset(heating_technology: &str) -> f64 {
    let tech = heating_technology.trim();
    if contains_ignore_case(tech, "t51") {
        T51_RESISTANCE_OFFSET
    } else if ["t58g", "ccell3.0", "ccell 3.0"]
        .iter()
        .any(|label| contains_ignore_case(tech, label))
    {
        T58G_RESISTANCE_OFFSET
    } else {
        0.0
    }
}

/// Electrical power `V² / (R + R_offset)`, or `0.0` when voltage or resistance is not positive
pub fn compute_power(voltage: f64, resistance: f64, heating_technology: &str) -> f64 {
    let denominator = resistance + resistance_offset(heating_technology);
    if voltage > 0.0 && resistance > 0.0 && denominator > 0.0 {
        voltage * voltage / denominator
    } else {
        0.0
    }
}

/// Read the metadata rows of one sample block using the layout for `version`
pub fn extract_metadata(
    sheet: &dyn Worksheet,
    sample_index: usize,
    version: TemplateVersion,
) -> SampleMetadata {
    let col_offset = block_start(sample_index);
    let layout = metadata_layout(version);
    tracing::debug!(
        "Extracting metadata for sample {} at column offset {col_offset} ({version} template)",
        sample_index + 1
    );

    let text = |offset: CellOffset| {
        text_or_empty(read_cell(sheet, offset.row, col_offset + offset.col).as_ref())
    };
    let number = |offset: CellOffset| {
        f64_or_zero(read_cell(sheet, offset.row, col_offset + offset.col).as_ref())
    };

    let heating_technology = layout.heating_technology.map(text).unwrap_or_default();
    let resistance = number(layout.resistance);
    let voltage = number(layout.voltage);
    let power = compute_power(voltage, resistance, &heating_technology);

    let metadata = SampleMetadata {
        test_name: text(layout.test_name),
        date: text(layout.date),
        sample_id: text(layout.sample_id),
        media: text(layout.media),
        resistance,
        voltage,
        power,
        viscosity: number(layout.viscosity),
        tester: text(layout.tester),
        puffing_regime: text(layout.puffing_regime),
        initial_oil_mass: number(layout.initial_oil_mass),
        heating_technology,
    };

    tracing::debug!(
        "Metadata extracted - sample ID: {}, tester: {}, voltage: {}, power: {:.4}",
        metadata.sample_id,
        metadata.tester,
        metadata.voltage,
        metadata.power
    );

    metadata
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::memory::MemoryWorksheet;
    use calamine::Data;
    use rstest::rstest;

    fn s(value: &str) -> Data {
        Data::String(value.to_string())
    }

    /// Two old-template blocks side by side; column M doubles as block 2's first column
    fn old_template_sheet() -> MemoryWorksheet {
        let mut rows = vec![vec![Data::Empty; 24]; 3];
        rows[0][0] = s("Intense Test");
        rows[0][3] = s("2025-01-15");
        rows[0][6] = s("S-001");
        rows[1][1] = s("Oil A");
        rows[1][3] = Data::Float(1.2);
        rows[1][8] = s("Regime 3s/30s");
        rows[2][1] = Data::Float(850.0);
        rows[2][3] = s(" Alice ");
        rows[2][6] = Data::Float(3.6);
        rows[2][12] = Data::Float(0.55);
        rows[0][12] = s("Intense Test");
        MemoryWorksheet::new(rows)
    }

    fn new_template_sheet() -> MemoryWorksheet {
        let mut rows = vec![vec![Data::Empty; 12]; 3];
        rows[0][0] = s("Long Puff lifetime Test");
        rows[0][2] = s("2025-12-01");
        rows[0][4] = s("N-042");
        rows[0][5] = s("T51");
        rows[1][0] = s("Oil B");
        rows[1][2] = Data::Float(1.0);
        rows[2][0] = s("1200");
        rows[2][2] = s("Bob");
        rows[2][4] = Data::Float(5.0);
        rows[2][6] = s("CORESTA");
        rows[2][7] = Data::Float(0.8);
        MemoryWorksheet::new(rows)
    }

    #[rstest]
    #[case("T51", T51_RESISTANCE_OFFSET)]
    #[case("  t51 ceramic ", T51_RESISTANCE_OFFSET)]
    #[case("T58G", T58G_RESISTANCE_OFFSET)]
    #[case("CCELL3.0", T58G_RESISTANCE_OFFSET)]
    #[case("Ccell 3.0 Evo", T58G_RESISTANCE_OFFSET)]
    #[case("Mesh", 0.0)]
    #[case("", 0.0)]
    fn test_resistance_offset(#[case] tech: &str, #[case] expected: f64) {
        assert!((resistance_offset(tech) - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn test_power_with_t51_offset() {
        assert!((compute_power(5.0, 1.0, "T51") - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_power_without_offset() {
        assert!((compute_power(3.6, 1.2, "") - 10.8).abs() < 1e-12);
    }

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(5.0, 0.0)]
    #[case(-5.0, 1.0)]
    #[case(5.0, -1.0)]
    fn test_power_is_zero_for_non_positive_inputs(#[case] voltage: f64, #[case] resistance: f64) {
        assert_eq!(compute_power(voltage, resistance, "T58G").to_bits(), 0.0_f64.to_bits());
    }

    #[test]
    fn test_extract_old_template_metadata() {
        let sheet = old_template_sheet();
        let metadata = extract_metadata(&sheet, 0, TemplateVersion::Old);

        assert_eq!(metadata.test_name, "Intense Test");
        assert_eq!(metadata.date, "2025-01-15");
        assert_eq!(metadata.sample_id, "S-001");
        assert_eq!(metadata.media, "Oil A");
        assert_eq!(metadata.puffing_regime, "Regime 3s/30s");
        assert_eq!(metadata.tester, "Alice");
        assert_eq!(metadata.heating_technology, "");
        assert!((metadata.resistance - 1.2).abs() < f64::EPSILON);
        assert!((metadata.viscosity - 850.0).abs() < f64::EPSILON);
        assert!((metadata.voltage - 3.6).abs() < f64::EPSILON);
        assert!((metadata.initial_oil_mass - 0.55).abs() < f64::EPSILON);
        assert!((metadata.power - 3.6 * 3.6 / 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_extract_applies_block_offset() {
        let sheet = old_template_sheet();
        let metadata = extract_metadata(&sheet, 1, TemplateVersion::Old);

        assert_eq!(metadata.test_name, "Intense Test");
        assert_eq!(metadata.sample_id, "");
        assert!(metadata.voltage.abs() < f64::EPSILON);
        assert!(metadata.power.abs() < f64::EPSILON);
    }

    #[test]
    fn test_extract_new_template_metadata() {
        let sheet = new_template_sheet();
        let metadata = extract_metadata(&sheet, 0, TemplateVersion::New);

        assert_eq!(metadata.test_name, "Long Puff lifetime Test");
        assert_eq!(metadata.date, "2025-12-01");
        assert_eq!(metadata.sample_id, "N-042");
        assert_eq!(metadata.heating_technology, "T51");
        assert_eq!(metadata.media, "Oil B");
        assert_eq!(metadata.tester, "Bob");
        assert_eq!(metadata.puffing_regime, "CORESTA");
        assert!((metadata.viscosity - 1200.0).abs() < f64::EPSILON); // Numeric text
        assert!((metadata.initial_oil_mass - 0.8).abs() < f64::EPSILON);
        assert!((metadata.power - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_same_block_differs_by_template() {
        let sheet = new_template_sheet();
        let metadata = extract_metadata(&sheet, 0, TemplateVersion::Old);

        // Old offsets land on different cells of a new-template block
        assert_eq!(metadata.sample_id, "");
        assert_eq!(metadata.heating_technology, "");
        assert!(metadata.power.abs() < f64::EPSILON);
    }
}
