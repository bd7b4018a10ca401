//! Filesystem and command template helpers.

pub mod fs;
pub mod template;

pub use fs::{ensure_dir_exists, remove_artifact};
pub use template::{TemplateProcessor, shell_quote};
