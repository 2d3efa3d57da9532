pub mod applicator;
pub mod loader;
pub mod schema;

pub use applicator::{apply_report, check_report};
pub use loader::{load_from_path, load_from_str, ConfigError};
pub use schema::{Metadata, ValidationError, ValidationIssue, ViolationEntry, ViolationReport};
