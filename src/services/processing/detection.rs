//! Template and legacy-format detection
//!
//! The template version is a workbook-level property decided from sheet
//! names alone. The deprecated check looks at the header row of a single
//! User Test Simulation sheet.

use crate::common::TemplateVersion;

/// Sheets that only exist in workbooks built from the new template
pub const NEW_TEMPLATE_INDICATORS: [&str; 5] = [
    "Long Puff lifetime Test",
    "Rapid Puff Lifetime Test",
    "Temperature Cycling Test #1",
    "Temperature Cycling Test #2",
    // Misspelled sheet name shipped in early December 2025 workbooks
    "Temperature Cycling Teset #2",
];

/// Headers found in columns 9-12 of the current 12-column User Test Simulation layout
pub const TWELVE_COLUMN_HEADERS: [&str; 4] =
    ["Average TPM", "Consistency", "Variation", "Oil Consumed"];

pub const USER_TEST_SIMULATION: &str = "User Test Simulation";

/// Zero-based header columns inspected by the deprecated-format check
pub const LEGACY_CHECK_COLUMNS: std::ops::Range<usize> = 8..12;

/// Classify a workbook from its sheet names (case-insensitive exact match)
pub fn template_from_sheet_names<S: AsRef<str>>(sheet_names: &[S]) -> TemplateVersion {
    let is_new = sheet_names.iter().any(|name| {
        NEW_TEMPLATE_INDICATORS
            .iter()
            .any(|indicator| name.as_ref().eq_ignore_ascii_case(indicator))
    });

    if is_new {
        tracing::debug!("Detected new template (December 2025)");
        TemplateVersion::New
    } else {
        tracing::debug!("Detected old template (January 2025)");
        TemplateVersion::Old
    }
}

pub fn is_user_test_simulation(sheet_name: &str) -> bool {
    contains_ignore_case(sheet_name, USER_TEST_SIMULATION)
}

/// True when any header contains one of the 12-column indicator names
pub fn has_twelve_column_headers<S: AsRef<str>>(headers: &[S]) -> bool {
    headers.iter().any(|header| {
        TWELVE_COLUMN_HEADERS
            .iter()
            .any(|expected| contains_ignore_case(header.as_ref(), expected))
    })
}

/// Substring match with the same ASCII case folding as sheet-name matching
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}
