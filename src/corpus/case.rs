use crate::core::error::{Error, Result};
use std::path::{Path, PathBuf};

/// One test program discovered in a suite directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Name of the suite directory the case belongs to.
    pub suite: String,
    /// File name of the test source, e.g. `0_hello.tl`.
    pub file_name: String,
    /// Full path to the test source.
    pub source: PathBuf,
    /// Companion stdin file, when one exists next to the source.
    pub input: Option<PathBuf>,
}

impl TestCase {
    /// Create a test case from its suite name and source path.
    pub fn new(suite: impl Into<String>, source: impl Into<PathBuf>, input: Option<PathBuf>) -> Self {
        let source = source.into();
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            suite: suite.into(),
            file_name,
            source,
            input,
        }
    }

    /// Whether the source file has zero length. Empty cases are never executed.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(std::fs::metadata(&self.source)?.len() == 0)
    }

    /// Expected exit code of the compiler, encoded as the file name prefix.
    pub fn expected_exit_code(&self, separator: char) -> Result<i32> {
        parse_expected_exit_code(&self.file_name, separator)
    }

    /// Path of the compiler artifact for this case inside `dir`.
    ///
    /// Named after the display name, which is also what `{{ARTIFACT}}`
    /// expands to.
    pub fn artifact_path(&self, dir: &Path, prefix: &str) -> PathBuf {
        dir.join(format!("{prefix}{}", self.file_name))
    }
}

/// Parse the integer preceding the first `separator` in `file_name`.
///
/// `3_missing_paren.tl` yields `3`. Names without the separator or with a
/// non-numeric prefix are corpus bugs and produce [`Error::Corpus`].
pub fn parse_expected_exit_code(file_name: &str, separator: char) -> Result<i32> {
    let (prefix, _) = file_name.split_once(separator).ok_or_else(|| {
        Error::corpus(format!(
            "test name '{file_name}' has no '{separator}' separator after the expected exit code"
        ))
    })?;

    prefix.parse::<i32>().map_err(|e| {
        Error::corpus(format!(
            "test name '{file_name}' has invalid expected exit code '{prefix}': {e}"
        ))
    })
}
