//! conformance-runner: a differential conformance runner for small language toolchains.
//!
//! For every test program in a corpus, the runner executes a trusted reference
//! interpreter and the pipeline under test (compiler, then an interpreter for
//! the generated code), compares exit codes and output, and classifies the
//! result into a fixed set of outcomes.
//!
//! # Quick Start
//!
//! ```no_run
//! use conformance_runner::builder;
//!
//! # fn main() -> conformance_runner::Result<()> {
//! let summary = builder().load_config()?.run()?;
//! std::process::exit(summary.exit_code());
//! # }
//! ```
//!
//! # Corpus Layout
//!
//! ```text
//! example-code/
//!     basic/
//!         0_hello.tl        expected compiler exit code 0, output compared
//!         0_div.tl
//!         0_div.txt         stdin for both interpreter runs
//!         2_type_error.tl   expected compiler exit code 2, nothing else checked
//! ```
//!
//! Empty test files are skipped. Names without a numeric `<code>_` prefix are
//! reported as `INTERNAL` corpus errors.
//!
//! # Configuration
//!
//! Defaults follow the conventions above. An optional `conformance-runner.toml`
//! in the working directory can change them:
//!
//! ```toml
//! timeout = 3
//!
//! [tools]
//! reference = "tl run {{SOURCE}}"
//! compiler = "../../ifj21"
//! interpreter = "./ic21int {{ARTIFACT}}"
//!
//! [profiles.release.tools]
//! compiler = "../../build/release/ifj21"
//! ```
//!
//! # Architecture
//!
//! - [`corpus`]: discovers suites and test cases
//! - [`runner::ToolRunner`]: runs one external command with a timeout
//! - [`harness::Comparator`]: sequences the three tools and classifies the case
//! - [`harness::TestHarness`]: tallies outcomes, prints progress, removes artifacts

pub mod config;
pub mod core;
pub mod corpus;
pub mod harness;
pub mod runner;
pub mod util;

// Re-export commonly used types
pub use crate::core::{ConformanceRunner, ConformanceRunnerBuilder, Error, Result};
pub use config::Config;
pub use harness::{Outcome, OutcomeKind, RunSummary, Tally};

/// Create a new conformance runner builder.
///
/// This is the main entry point for the fluent API.
pub fn builder() -> ConformanceRunnerBuilder {
    ConformanceRunnerBuilder::new()
}
