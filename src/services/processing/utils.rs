//! Cell conversion helpers
//!
//! Every conversion here is total: a missing or unusable cell turns into the
//! empty string or `0.0`, never an error. Extraction relies on this to give
//! best-effort output for partially filled sheets.

use crate::external::Worksheet;
use calamine::Data;
use chrono::{NaiveDate, TimeDelta};

const SECONDS_PER_DAY: f64 = 86_400.0;
/// Serial number of 9999-12-31, the last date Excel can represent
const MAX_EXCEL_SERIAL: f64 = 2_958_465.999_99;

/// Read a cell by zero-based address, translating to the accessor's 1-based one
pub fn read_cell(sheet: &dyn Worksheet, row: usize, col: usize) -> Option<Data> {
    let row = u32::try_from(row.checked_add(1)?).ok()?;
    let col = u32::try_from(col.checked_add(1)?).ok()?;
    sheet.read(row, col)
}

/// Render a cell as trimmed text
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            let text = if dt.is_duration() {
                excel_duration_to_text(serial)
            } else {
                excel_serial_to_text(serial)
            };
            text.unwrap_or_else(|| serial.to_string())
        }
        Data::Error(e) => e.to_string(),
    }
}

/// Text of an optional cell, empty when the cell is absent
pub fn text_or_empty(cell: Option<&Data>) -> String {
    cell.map(cell_text).unwrap_or_default()
}

/// Read a cell as a number; non-numeric content (dates included) yields `0.0`
pub fn cell_f64(cell: &Data) -> f64 {
    let value = match cell {
        #[allow(clippy::cast_precision_loss)]
        Data::Int(i) => *i as f64, // Measurements never approach 2^53
        Data::Float(f) => *f,
        Data::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Data::Bool(b) => f64::from(u8::from(*b)),
        Data::Empty
        | Data::DateTime(_)
        | Data::DateTimeIso(_)
        | Data::DurationIso(_)
        | Data::Error(_) => 0.0,
    };

    if value.is_finite() { value } else { 0.0 }
}

/// Number of an optional cell, `0.0` when the cell is absent
pub fn f64_or_zero(cell: Option<&Data>) -> f64 {
    cell.map_or(0.0, cell_f64)
}

/// A cell is blank when it is absent or its trimmed text is empty
pub fn is_blank(cell: Option<&Data>) -> bool {
    cell.is_none_or(|value| cell_text(value).is_empty())
}

/// Convert an Excel serial date (1900 system) to ISO text.
///
/// Whole days render as `YYYY-MM-DD`; a time of day adds ` HH:MM:SS`.
fn excel_serial_to_text(serial: f64) -> Option<String> {
    if !serial.is_finite() || !(0.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }

    // Bounded by MAX_EXCEL_SERIAL above
    #[allow(clippy::cast_possible_truncation)]
    let total_seconds = (serial * SECONDS_PER_DAY).round() as i64;

    // Serial 0 maps to 1899-12-30, which absorbs the 1900 leap-year bug for
    // every date after February 1900
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let timestamp = epoch.checked_add_signed(TimeDelta::try_seconds(total_seconds)?)?;

    let format = if total_seconds % 86_400 == 0 {
        "%Y-%m-%d"
    } else {
        "%Y-%m-%d %H:%M:%S"
    };
    Some(timestamp.format(format).to_string())
}

/// Render an Excel duration (fractional days) as elapsed `H:MM:SS`
fn excel_duration_to_text(days: f64) -> Option<String> {
    if !days.is_finite() || days.abs() > MAX_EXCEL_SERIAL {
        return None;
    }

    #[allow(clippy::cast_possible_truncation)]
    let delta = TimeDelta::try_seconds((days * SECONDS_PER_DAY).round() as i64)?;
    let sign = if delta < TimeDelta::zero() { "-" } else { "" };
    let delta = delta.abs();

    Some(format!(
        "{sign}{}:{:02}:{:02}",
        delta.num_hours(),
        delta.num_minutes() % 60,
        delta.num_seconds() % 60
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::memory::MemoryWorksheet;
    use calamine::{CellErrorType, ExcelDateTime, ExcelDateTimeType};
    use rstest::rstest;

    #[test]
    fn test_cell_text_trims_strings() {
        assert_eq!(cell_text(&Data::String("  Intense Test \t".to_string())), "Intense Test");
        assert_eq!(cell_text(&Data::String("   ".to_string())), "");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn test_cell_text_renders_numbers_without_trailing_zeros() {
        assert_eq!(cell_text(&Data::Float(3.0)), "3");
        assert_eq!(cell_text(&Data::Float(1.25)), "1.25");
        assert_eq!(cell_text(&Data::Int(-7)), "-7");
        assert_eq!(cell_text(&Data::Bool(true)), "true");
    }

    #[test]
    fn test_cell_text_renders_excel_dates() {
        let date = ExcelDateTime::new(45_672.0, ExcelDateTimeType::DateTime, false);
        assert_eq!(cell_text(&Data::DateTime(date)), "2025-01-15");

        let with_time = ExcelDateTime::new(45_672.5, ExcelDateTimeType::DateTime, false);
        assert_eq!(cell_text(&Data::DateTime(with_time)), "2025-01-15 12:00:00");
    }

    #[rstest]
    #[case(0.25, "6:00:00")]
    #[case(1.5, "36:00:00")]
    #[case(0.000_7, "0:01:00")]
    #[case(-0.5, "-12:00:00")]
    fn test_cell_text_renders_durations_as_elapsed_time(#[case] days: f64, #[case] expected: &str) {
        let duration = ExcelDateTime::new(days, ExcelDateTimeType::TimeDelta, false);
        assert_eq!(cell_text(&Data::DateTime(duration)), expected);
    }

    #[test]
    fn test_cell_text_keeps_error_marker() {
        assert_eq!(cell_text(&Data::Error(CellErrorType::Div0)), "#DIV/0!");
    }

    #[rstest]
    #[case(Data::Float(3.7), 3.7)]
    #[case(Data::Int(12), 12.0)]
    #[case(Data::String(" 2.5 ".to_string()), 2.5)]
    #[case(Data::String("n/a".to_string()), 0.0)]
    #[case(Data::String(String::new()), 0.0)]
    #[case(Data::Bool(true), 1.0)]
    #[case(Data::Empty, 0.0)]
    #[case(Data::Error(CellErrorType::Value), 0.0)]
    #[case(Data::Float(f64::NAN), 0.0)]
    #[case(Data::DateTime(ExcelDateTime::new(45_672.0, ExcelDateTimeType::DateTime, false)), 0.0)]
    #[case(Data::DateTime(ExcelDateTime::new(0.5, ExcelDateTimeType::TimeDelta, false)), 0.0)]
    fn test_cell_f64(#[case] cell: Data, #[case] expected: f64) {
        assert!((cell_f64(&cell) - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn test_absent_cells_use_defaults() {
        assert_eq!(text_or_empty(None), "");
        assert!(f64_or_zero(None).abs() < f64::EPSILON);
        assert!(is_blank(None));
    }

    #[test]
    fn test_read_cell_uses_zero_based_addresses() {
        let sheet = MemoryWorksheet::new(vec![
            vec![Data::String("A1".to_string())],
            vec![Data::Empty, Data::String("B2".to_string())],
        ]);

        assert_eq!(read_cell(&sheet, 0, 0), Some(Data::String("A1".to_string())));
        assert_eq!(read_cell(&sheet, 1, 1), Some(Data::String("B2".to_string())));
        assert_eq!(read_cell(&sheet, 1, 0), None);
        assert_eq!(read_cell(&sheet, usize::MAX, 0), None);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(Some(&Data::Empty)));
        assert!(is_blank(Some(&Data::String("  ".to_string()))));
        assert!(!is_blank(Some(&Data::Float(0.0))));
        assert!(!is_blank(Some(&Data::String("x".to_string()))));
    }
}
