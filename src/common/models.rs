use serde::{Deserialize, Serialize};
use std::fmt;

/// Layout convention governing where each metadata field sits in a sample block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateVersion {
    /// January 2025 layout
    Old,
    /// December 2025 layout, recognised by its dedicated test sheets
    New,
    /// No sheet is selected
    Unknown,
}

impl TemplateVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateVersion::Old => "old",
            TemplateVersion::New => "new",
            TemplateVersion::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TemplateVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
