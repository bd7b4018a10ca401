//! Terminal output formatting for conformance results.

use std::io::{self, Write};

use super::outcome::Outcome;
use super::tally::Tally;

/// Formats and prints progress, failures and summaries.
pub struct ResultFormatter<W: Write> {
    out: W,
    /// A line of `.` markers is open and must be closed before the next block.
    markers_open: bool,
}

impl<W: Write> ResultFormatter<W> {
    /// Create a formatter writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            markers_open: false,
        }
    }

    /// Consume the formatter and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print the header shown before a suite runs.
    pub fn suite_header(&mut self, suite: &str) -> io::Result<()> {
        self.close_markers()?;
        writeln!(self.out, "* Suite {suite}:")
    }

    /// Print the progress marker for a passing case.
    pub fn success(&mut self) -> io::Result<()> {
        self.markers_open = true;
        write!(self.out, ".")?;
        self.out.flush()
    }

    /// Print a failure block with the outcome kind and diagnostic.
    pub fn failure(&mut self, test_name: &str, outcome: &Outcome) -> io::Result<()> {
        self.close_markers()?;
        writeln!(self.out, "Fail - {test_name}: {}", outcome.kind())?;

        if let Some(message) = outcome.message() {
            if !message.is_empty() {
                writeln!(self.out, "{message}")?;
            }
        }

        if let Outcome::DiffOut { expected, actual } = outcome {
            writeln!(self.out, "Expected output:")?;
            writeln!(self.out, "{expected}")?;
            write!(self.out, "----------------------\n\n")?;
            writeln!(self.out, "Got output:")?;
            writeln!(self.out, "{actual}")?;
        }

        self.out.flush()
    }

    /// Print the per-suite summary line.
    pub fn suite_footer(&mut self, tally: &Tally) -> io::Result<()> {
        self.close_markers()?;
        writeln!(self.out, "\n{}\n", summary_line(tally))
    }

    /// Print the grand total across all suites.
    pub fn final_footer(&mut self, total: &Tally) -> io::Result<()> {
        self.close_markers()?;
        writeln!(self.out, "Total: {}", summary_line(total))?;
        self.out.flush()
    }

    fn close_markers(&mut self) -> io::Result<()> {
        if self.markers_open {
            self.markers_open = false;
            writeln!(self.out)?;
        }
        Ok(())
    }
}

fn summary_line(tally: &Tally) -> String {
    format!(
        "{} tests - {} passed, {} failed, {} skipped",
        tally.run(),
        tally.passed,
        tally.failed,
        tally.skipped
    )
}
