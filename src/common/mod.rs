pub mod errors;
pub mod models;

pub use errors::WorkbookError;
pub use models::TemplateVersion;
