use dotenvy::dotenv;
use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_APP_NAME: &str = "DataViewer Enterprise";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `tpm_sheets=debug`
    pub log_filter: String,
    /// Base directory for relative workbook paths
    pub data_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok(); // Load from .env file if available
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Config {
            app_name: non_empty("TPM_SHEETS_APP_NAME")
                .unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            log_filter: non_empty("TPM_SHEETS_LOG")
                .or_else(|| non_empty("RUST_LOG"))
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            data_dir: non_empty("TPM_SHEETS_DATA_DIR").map(PathBuf::from),
        }
    }

    /// Resolve a workbook path against `data_dir` unless it is already absolute
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.data_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            app_name: "tpm-sheets-test".to_string(),
            log_filter: "debug".to_string(),
            data_dir: None,
        }
    }
}
