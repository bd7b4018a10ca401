//! Test corpus discovery: suite directories, test sources and companion inputs.
//!
//! A corpus is a root directory with one subdirectory per suite. Each suite
//! holds test sources (`<code>_<name>.tl`) and optional companion stdin files
//! sharing the base name (`<code>_<name>.txt`). Only one directory level is
//! traversed.

mod case;

pub use case::{TestCase, parse_expected_exit_code};

use crate::config::CorpusConfig;
use crate::core::error::{Error, Result};
use std::path::{Path, PathBuf};

/// A directory grouping related test cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suite {
    /// Directory name of the suite.
    pub name: String,
    /// Full path to the suite directory.
    pub dir: PathBuf,
}

/// Read-only view of a test corpus on disk.
#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
    source_extension: String,
    input_extension: String,
}

impl Corpus {
    /// Create a corpus rooted at `root` using the configured file conventions.
    pub fn new(root: impl Into<PathBuf>, layout: &CorpusConfig) -> Self {
        Self {
            root: root.into(),
            source_extension: layout.source_extension.clone(),
            input_extension: layout.input_extension.clone(),
        }
    }

    /// Root directory of the corpus.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List the suite directories directly under the root, sorted by name.
    pub fn suites(&self) -> Result<Vec<Suite>> {
        if !self.root.is_dir() {
            return Err(Error::FileNotFound(self.root.clone()));
        }

        let mut suites = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() && !entry.path().is_dir() {
                continue;
            }
            suites.push(Suite {
                name: entry.file_name().to_string_lossy().into_owned(),
                dir: entry.path(),
            });
        }

        suites.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::info!(root = %self.root.display(), count = suites.len(), "discovered suites");
        Ok(suites)
    }

    /// List the test cases of a suite, sorted by file name.
    ///
    /// A file is a test case when its name ends in `.<source-extension>`.
    /// Names need not be valid UTF-8; the real path is kept for execution.
    pub fn test_cases(&self, suite: &Suite) -> Result<Vec<TestCase>> {
        let suffix = format!(".{}", self.source_extension);

        let mut cases = Vec::new();
        for entry in std::fs::read_dir(&suite.dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            if !entry
                .file_name()
                .as_encoded_bytes()
                .ends_with(suffix.as_bytes())
            {
                continue;
            }

            let source = entry.path();
            let input = self.companion_input(&source);
            cases.push(TestCase::new(&suite.name, source, input));
        }

        cases.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        tracing::debug!(suite = %suite.name, count = cases.len(), "discovered test cases");
        Ok(cases)
    }

    /// Companion stdin file sharing the base name of `source`, if present.
    fn companion_input(&self, source: &Path) -> Option<PathBuf> {
        let mut candidate = source.to_path_buf();
        // one `set_extension("")` per dot-separated part of the source extension
        for _ in self.source_extension.split('.') {
            candidate.set_extension("");
        }
        candidate.set_extension(&self.input_extension);
        candidate.is_file().then_some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus_fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("basic")).unwrap();
        std::fs::create_dir_all(root.join("errors/nested")).unwrap();
        std::fs::write(root.join("README.md"), "not a suite").unwrap();

        std::fs::write(root.join("basic/0_hello.tl"), "print('Hi')").unwrap();
        std::fs::write(root.join("basic/0_div.tl"), "read()").unwrap();
        std::fs::write(root.join("basic/0_div.txt"), "0").unwrap();
        std::fs::write(root.join("basic/notes.md"), "ignored").unwrap();
        std::fs::write(root.join("errors/1_syntax_err.tl"), "((").unwrap();
        std::fs::write(root.join("errors/nested/0_deep.tl"), "x").unwrap();
        dir
    }

    #[test]
    fn test_suites_lists_subdirectories_sorted() {
        let dir = corpus_fixture();
        let corpus = Corpus::new(dir.path(), &CorpusConfig::default());
        let names: Vec<_> = corpus
            .suites()
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["basic", "errors"]);
    }

    #[test]
    fn test_suites_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = Corpus::new(dir.path().join("example-code"), &CorpusConfig::default());
        assert!(matches!(corpus.suites(), Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_test_cases_filters_by_extension_and_pairs_inputs() {
        let dir = corpus_fixture();
        let corpus = Corpus::new(dir.path(), &CorpusConfig::default());
        let suites = corpus.suites().unwrap();
        let cases = corpus.test_cases(&suites[0]).unwrap();

        let names: Vec<_> = cases.iter().map(|c| c.file_name.as_str()).collect();
        assert_eq!(names, vec!["0_div.tl", "0_hello.tl"]);
        assert_eq!(cases[0].suite, "basic");
        assert_eq!(cases[0].input, Some(dir.path().join("basic/0_div.txt")));
        assert_eq!(cases[1].input, None);
    }

    #[test]
    fn test_test_cases_does_not_recurse() {
        let dir = corpus_fixture();
        let corpus = Corpus::new(dir.path(), &CorpusConfig::default());
        let suites = corpus.suites().unwrap();
        let cases = corpus.test_cases(&suites[1]).unwrap();
        let names: Vec<_> = cases.iter().map(|c| c.file_name.as_str()).collect();
        assert_eq!(names, vec!["1_syntax_err.tl"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_test_cases_keeps_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let suite_dir = dir.path().join(OsStr::from_bytes(b"s\xff"));
        std::fs::create_dir_all(&suite_dir).unwrap();
        let source = suite_dir.join(OsStr::from_bytes(b"0_\xffbad.tl"));
        let input = suite_dir.join(OsStr::from_bytes(b"0_\xffbad.txt"));
        std::fs::write(&source, "x").unwrap();
        std::fs::write(&input, "1").unwrap();

        let corpus = Corpus::new(dir.path(), &CorpusConfig::default());
        let suites = corpus.suites().unwrap();
        assert_eq!(suites.len(), 1);
        assert_eq!(suites[0].name, "s\u{FFFD}");

        let cases = corpus.test_cases(&suites[0]).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].file_name, "0_\u{FFFD}bad.tl");
        assert_eq!(cases[0].source, source);
        assert_eq!(cases[0].input, Some(input));
    }

    #[test]
    fn test_test_cases_multi_part_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("s")).unwrap();
        std::fs::write(dir.path().join("s/0_a.test.tl"), "x").unwrap();
        std::fs::write(dir.path().join("s/0_a.in"), "1").unwrap();

        let layout = CorpusConfig {
            source_extension: "test.tl".to_string(),
            input_extension: "in".to_string(),
            ..CorpusConfig::default()
        };
        let corpus = Corpus::new(dir.path(), &layout);
        let suites = corpus.suites().unwrap();
        let cases = corpus.test_cases(&suites[0]).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].input, Some(dir.path().join("s/0_a.in")));
    }

    #[test]
    fn test_test_cases_custom_extensions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("s")).unwrap();
        std::fs::write(dir.path().join("s/0_a.lang"), "x").unwrap();
        std::fs::write(dir.path().join("s/0_a.in"), "1").unwrap();
        std::fs::write(dir.path().join("s/0_b.tl"), "x").unwrap();

        let layout = CorpusConfig {
            source_extension: "lang".to_string(),
            input_extension: "in".to_string(),
            ..CorpusConfig::default()
        };
        let corpus = Corpus::new(dir.path(), &layout);
        let suites = corpus.suites().unwrap();
        let cases = corpus.test_cases(&suites[0]).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].file_name, "0_a.lang");
        assert_eq!(cases[0].input, Some(dir.path().join("s/0_a.in")));
    }
}
