//! Report types: results, severity levels, aggregation and rendering.

use std::fmt;

/// Severity level of a check result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The property holds.
    Pass,
    /// Informational; does not fail the report.
    Warning,
    /// The property is violated.
    Failure,
}

impl Severity {
    /// Tag printed in front of a result line.
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Pass => "PASS",
            Severity::Warning => "WARN",
            Severity::Failure => "FAIL",
        }
    }
}

/// A single check result.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Identifier of the validator, e.g. `partition/involution`.
    pub validator: String,
    /// What was checked, or what went wrong.
    pub message: String,
    /// Outcome.
    pub severity: Severity,
    /// Counterexamples or extra context, one per line.
    pub details: Vec<String>,
}

impl TestResult {
    /// A passing result.
    pub fn pass(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with(validator, message, Severity::Pass, Vec::new())
    }

    /// A failing result.
    pub fn fail(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with(validator, message, Severity::Failure, Vec::new())
    }

    /// A failing result with counterexamples.
    pub fn fail_with_details(
        validator: impl Into<String>,
        message: impl Into<String>,
        details: Vec<String>,
    ) -> Self {
        Self::with(validator, message, Severity::Failure, details)
    }

    /// A warning.
    pub fn warn(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with(validator, message, Severity::Warning, Vec::new())
    }

    /// Pass with `message` when `violations` is empty, otherwise fail
    /// listing them.
    pub fn from_violations(
        validator: impl Into<String>,
        message: impl Into<String>,
        violations: Vec<String>,
    ) -> Self {
        if violations.is_empty() {
            Self::pass(validator, message)
        } else {
            let message = format!("{} ({} violation(s))", message.into(), violations.len());
            Self::fail_with_details(validator, message, violations)
        }
    }

    fn with(
        validator: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        details: Vec<String>,
    ) -> Self {
        Self {
            validator: validator.into(),
            message: message.into(),
            severity,
            details,
        }
    }

    /// Whether this result is a failure.
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Failure
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} — {}", self.severity.label(), self.validator, self.message)?;
        for detail in &self.details {
            write!(f, "\n       {detail}")?;
        }
        Ok(())
    }
}

/// Aggregated results of every validator.
#[derive(Debug, Default)]
pub struct ConformanceReport {
    /// Individual results, in run order.
    pub results: Vec<TestResult>,
}

impl ConformanceReport {
    /// An empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result.
    pub fn push(&mut self, result: TestResult) {
        self.results.push(result);
    }

    /// Appends every result of `other`.
    pub fn extend(&mut self, other: ConformanceReport) {
        self.results.extend(other.results);
    }

    fn count(&self, severity: Severity) -> usize {
        self.results.iter().filter(|r| r.severity == severity).count()
    }

    /// Number of passing checks.
    pub fn pass_count(&self) -> usize {
        self.count(Severity::Pass)
    }

    /// Number of warnings.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Number of failed checks.
    pub fn failure_count(&self) -> usize {
        self.count(Severity::Failure)
    }

    /// Whether no check failed.
    pub fn all_passed(&self) -> bool {
        self.failure_count() == 0
    }

    /// `Summary: P passed, W warnings, F failed`.
    pub fn summary(&self) -> String {
        format!(
            "Summary: {} passed, {} warnings, {} failed",
            self.pass_count(),
            self.warning_count(),
            self.failure_count()
        )
    }
}
