//! Human-readable reporting of property and table runs.

use std::fmt;
use std::time::Duration;

use crate::error::{PropertyResult, TestFailure, TestSuccess};
use crate::table::TableReport;

/// Formatting helpers shared by the CLI and by test code
pub struct TestRunner;

impl TestRunner {
    /// Format a property test result for standard test output
    pub fn format_result<T>(result: &PropertyResult<T>) -> String
    where
        T: fmt::Debug,
    {
        match result {
            Ok(success) => Self::format_success(success),
            Err(failure) => Self::format_failure(failure),
        }
    }

    /// Format a successful test result
    pub fn format_success<T>(success: &TestSuccess<T>) -> String {
        format!(
            "Property test PASSED after {} iterations (seed: {}, {:?})",
            success.iterations, success.seed, success.duration
        )
    }

    /// Format a failed test result
    pub fn format_failure<T>(failure: &TestFailure<T>) -> String
    where
        T: fmt::Debug,
    {
        let mut output = String::new();

        output.push_str(&format!("Property test FAILED: {}", failure.error));
        output.push_str(&format!(
            "\nFailing input (iteration {}): {:?}",
            failure.failed_iteration, failure.input
        ));
        output.push_str(&format!(
            "\nSeed: {} (use this to reproduce the failure)",
            failure.seed
        ));
        output.push_str(&format!("\nTest duration: {:?}", failure.duration));

        output
    }

    /// Format a table report: a headline followed by every failing entry
    pub fn format_table<T>(report: &TableReport<T>) -> String
    where
        T: fmt::Debug,
    {
        let mut output = if report.passed() {
            format!(
                "Table test PASSED: {} entries in {:?}",
                report.len(),
                report.duration()
            )
        } else {
            format!(
                "Table test FAILED: {} of {} entries failed",
                report.failure_count(),
                report.len()
            )
        };

        for entry in report.failures() {
            output.push_str(&format!("\n  entry {}: {:?}", entry.index, entry.input));
            if let Some(error) = entry.outcome.error() {
                output.push_str(&format!("\n    error: {}", error));
            }
        }

        output
    }
}

/// Outcome of one suite, detached from the input type
#[derive(Debug, Clone, PartialEq)]
pub enum TestResult {
    /// Test passed
    Passed { cases: usize, duration: Duration },
    /// Test failed; `report` is the formatted failure
    Failed {
        failed: usize,
        cases: usize,
        report: String,
    },
}

impl TestResult {
    /// Create a TestResult from a PropertyResult
    pub fn from_property_result<T>(result: &PropertyResult<T>) -> Self
    where
        T: fmt::Debug,
    {
        match result {
            Ok(success) => TestResult::Passed {
                cases: success.iterations,
                duration: success.duration,
            },
            Err(failure) => TestResult::Failed {
                failed: 1,
                cases: failure.failed_iteration + 1,
                report: TestRunner::format_failure(failure),
            },
        }
    }

    /// Create a TestResult from a finished table run
    pub fn from_table_report<T>(report: &TableReport<T>) -> Self
    where
        T: fmt::Debug,
    {
        if report.passed() {
            TestResult::Passed {
                cases: report.len(),
                duration: report.duration(),
            }
        } else {
            TestResult::Failed {
                failed: report.failure_count(),
                cases: report.len(),
                report: TestRunner::format_table(report),
            }
        }
    }

    /// Check if the test passed
    pub fn is_passed(&self) -> bool {
        matches!(self, TestResult::Passed { .. })
    }

    /// Number of cases that were evaluated
    pub fn cases(&self) -> usize {
        match self {
            TestResult::Passed { cases, .. } | TestResult::Failed { cases, .. } => *cases,
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestResult::Passed { cases, duration } => {
                write!(f, "PASSED ({} cases in {:?})", cases, duration)
            }
            TestResult::Failed {
                failed,
                cases,
                report,
            } => {
                write!(f, "FAILED ({} of {} cases)\n{}", failed, cases, report)
            }
        }
    }
}
