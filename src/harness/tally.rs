use super::outcome::Outcome;

/// Pass/fail/skip counters for one suite or a whole run.
///
/// Tallies are plain values: recording returns the updated tally instead of
/// mutating shared state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Tally {
    /// Total number of cases recorded.
    pub fn run(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    /// Count one outcome.
    ///
    /// Outcomes that are neither passes nor failures (empty files, malformed
    /// corpus names) are counted with the skipped cases.
    pub fn record(mut self, outcome: &Outcome) -> Self {
        if outcome.is_failure() {
            self.failed += 1;
        } else if *outcome == Outcome::Ok {
            self.passed += 1;
        } else {
            self.skipped += 1;
        }
        self
    }

    /// Sum two tallies.
    pub fn merge(self, other: Tally) -> Self {
        Self {
            passed: self.passed + other.passed,
            failed: self.failed + other.failed,
            skipped: self.skipped + other.skipped,
        }
    }
}

/// Tally of one suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteSummary {
    pub name: String,
    pub tally: Tally,
}

/// Per-suite tallies and the grand total of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub suites: Vec<SuiteSummary>,
    pub total: Tally,
}

impl RunSummary {
    /// Add a finished suite and fold it into the total.
    pub fn with_suite(mut self, summary: SuiteSummary) -> Self {
        self.total = self.total.merge(summary.tally);
        self.suites.push(summary);
        self
    }

    /// Whether no case failed or timed out.
    pub fn success(&self) -> bool {
        self.total.failed == 0
    }

    /// Process exit status for this run: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.success() { 0 } else { 1 }
    }
}
