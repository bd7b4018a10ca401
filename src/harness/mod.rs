//! Conformance harness: runs every suite of the corpus and reports results.
//!
//! The harness sits after discovery in the pipeline:
//! `Corpus → Comparator (reference, compiler, interpreter) → ResultFormatter`.
//! Artifacts of passing cases are deleted; failing cases keep theirs for
//! inspection.

mod comparator;
mod formatter;
mod outcome;
mod tally;

pub use comparator::Comparator;
pub use formatter::ResultFormatter;
pub use outcome::{Outcome, OutcomeKind};
pub use tally::{RunSummary, SuiteSummary, Tally};

use crate::core::context::Context;
use crate::core::error::Result;
use crate::corpus::{Corpus, Suite, TestCase};
use crate::runner::ToolRunner;
use crate::util::remove_artifact;
use std::io::Write;

/// Drives suites sequentially, one test case at a time.
pub struct TestHarness<'a, W: Write> {
    ctx: &'a Context,
    corpus: Corpus,
    comparator: Comparator<'a>,
    formatter: ResultFormatter<W>,
}

impl<'a, W: Write> TestHarness<'a, W> {
    /// Create a harness for the corpus described by `ctx`.
    pub fn new(ctx: &'a Context, runner: &'a dyn ToolRunner, formatter: ResultFormatter<W>) -> Self {
        Self {
            ctx,
            corpus: Corpus::new(&ctx.corpus_root, &ctx.config.corpus),
            comparator: Comparator::new(ctx, runner),
            formatter,
        }
    }

    /// Run every suite and print the grand total.
    pub fn run(&mut self) -> Result<RunSummary> {
        let suites = self.corpus.suites()?;

        let mut summary = RunSummary::default();
        for suite in &suites {
            let suite_summary = self.run_suite(suite)?;
            summary = summary.with_suite(suite_summary);
        }

        self.formatter.final_footer(&summary.total)?;
        Ok(summary)
    }

    /// Run all cases of one suite.
    ///
    /// A suite directory that cannot be listed is reported as one failed
    /// entry; the remaining suites still run.
    pub fn run_suite(&mut self, suite: &Suite) -> Result<SuiteSummary> {
        self.formatter.suite_header(&suite.name)?;

        let mut tally = Tally::default();
        match self.corpus.test_cases(suite) {
            Ok(cases) => {
                for case in &cases {
                    let outcome = self.run_case(case)?;
                    tally = tally.record(&outcome);
                }
            }
            Err(e) => {
                tracing::warn!(suite = %suite.name, error = %e, "cannot list suite");
                let outcome = Outcome::HarnessFault {
                    message: format!("cannot list suite {}: {}", suite.dir.display(), e),
                };
                self.formatter.failure(&suite.name, &outcome)?;
                tally = tally.record(&outcome);
            }
        }

        self.formatter.suite_footer(&tally)?;
        Ok(SuiteSummary {
            name: suite.name.clone(),
            tally,
        })
    }

    /// Compare one case, report it, and clean up after a pass.
    pub fn run_case(&mut self, case: &TestCase) -> Result<Outcome> {
        let outcome = self.comparator.compare(case);
        tracing::debug!(suite = %case.suite, case = %case.file_name, outcome = %outcome.kind(), "case finished");

        match &outcome {
            Outcome::Ok => {
                self.formatter.success()?;
                let artifact = self.ctx.artifact_path(case);
                if let Err(e) = remove_artifact(&artifact) {
                    tracing::warn!("{}", e);
                }
            }
            Outcome::Skipped => {}
            other => self.formatter.failure(&case.file_name, other)?,
        }

        Ok(outcome)
    }

    /// Consume the harness and return the formatter's writer.
    pub fn into_writer(self) -> W {
        self.formatter.into_inner()
    }
}
