//! Contract cases: named scenarios with checks against backend responses.

use serde::{Deserialize, Serialize};

/// A single expectation evaluated against a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expectation {
    /// Response status must equal the expected code.
    StatusIs {
        /// Expected status code.
        expected: u16,
    },
    /// Response body must contain the needle as a substring.
    BodyContains {
        /// Substring that must appear in the body.
        needle: String,
    },
    /// Response body must equal the expected text exactly.
    BodyEquals {
        /// Expected body text.
        expected: String,
    },
    /// Response body must parse as JSON.
    BodyIsJson,
    /// Content-Type header must contain the expected value.
    ContentTypeContains {
        /// Substring that must appear in the Content-Type header.
        expected: String,
    },
}

impl Expectation {
    /// Gets a human-readable description of the expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusIs { expected } => format!("status is {expected}"),
            Self::BodyContains { needle } => format!("body contains {needle:?}"),
            Self::BodyEquals { expected } => format!("body equals {expected:?}"),
            Self::BodyIsJson => "body is valid JSON".to_string(),
            Self::ContentTypeContains { expected } => {
                format!("content type contains {expected:?}")
            }
        }
    }
}

/// An expectation paired with the message reported on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    /// The expectation to evaluate.
    pub expectation: Expectation,
    /// Message shown when the expectation fails.
    pub message: String,
}

impl Check {
    /// Creates a check.
    #[must_use]
    pub fn new(expectation: Expectation, message: impl Into<String>) -> Self {
        Self {
            expectation,
            message: message.into(),
        }
    }

    /// Creates a status check.
    #[must_use]
    pub fn status_is(expected: u16, message: impl Into<String>) -> Self {
        Self::new(Expectation::StatusIs { expected }, message)
    }

    /// Creates a body-substring check.
    #[must_use]
    pub fn body_contains(needle: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            Expectation::BodyContains {
                needle: needle.into(),
            },
            message,
        )
    }

    /// Creates an exact-body check.
    #[must_use]
    pub fn body_equals(expected: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            Expectation::BodyEquals {
                expected: expected.into(),
            },
            message,
        )
    }

    /// Creates a JSON-body check.
    #[must_use]
    pub fn body_is_json(message: impl Into<String>) -> Self {
        Self::new(Expectation::BodyIsJson, message)
    }

    /// Creates a Content-Type check.
    #[must_use]
    pub fn content_type_contains(expected: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            Expectation::ContentTypeContains {
                expected: expected.into(),
            },
            message,
        )
    }
}

/// A named scenario: one GET request and the checks run on its response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCase {
    /// Scenario name.
    pub name: String,
    /// Request path, relative to the mock server base URL.
    pub path: String,
    /// Checks evaluated against the response, in order.
    pub checks: Vec<Check>,
}

impl ContractCase {
    /// Creates a contract case with no checks.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            checks: Vec::new(),
        }
    }

    /// Adds a check to the case.
    #[must_use]
    pub fn with_check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Returns the number of checks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns true if the case has no checks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

/// Result of evaluating a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// The check that was evaluated.
    pub check: Check,
    /// Whether the check passed.
    pub passed: bool,
    /// Actual value observed, when one is worth reporting.
    pub actual: Option<String>,
    /// Failure detail, set only when the check failed.
    pub error: Option<String>,
}

impl CheckResult {
    /// Creates a passing result.
    #[must_use]
    pub const fn pass(check: Check) -> Self {
        Self {
            check,
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Creates a passing result with the observed value.
    #[must_use]
    pub fn pass_with_value(check: Check, actual: impl Into<String>) -> Self {
        Self {
            check,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Creates a failing result.
    #[must_use]
    pub fn fail(check: Check, error: impl Into<String>) -> Self {
        Self {
            check,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Creates a failing result with the observed value.
    #[must_use]
    pub fn fail_with_value(
        check: Check,
        error: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            check,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}

/// Outcome of running every check of one contract case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseOutcome {
    /// Scenario name.
    pub case_name: String,
    /// Request path the case exercised.
    pub path: String,
    /// Per-check results, in evaluation order.
    pub results: Vec<CheckResult>,
    /// Total number of checks evaluated.
    pub total: usize,
    /// Number of checks that passed.
    pub passed: usize,
    /// Number of checks that failed.
    pub failed: usize,
}

impl CaseOutcome {
    /// Creates an outcome from per-check results.
    #[must_use]
    pub fn new(case: &ContractCase, results: Vec<CheckResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;

        Self {
            case_name: case.name.clone(),
            path: case.path.clone(),
            results,
            total,
            passed,
            failed,
        }
    }

    /// Returns true if every check passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Iterates over the failed checks.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    /// Renders a multi-line failure report suitable for assertion messages.
    #[must_use]
    pub fn report(&self) -> String {
        let mut out = format!(
            "case {:?} (GET {}): {} of {} checks failed",
            self.case_name, self.path, self.failed, self.total
        );
        for failure in self.failures() {
            out.push_str("\n  - ");
            out.push_str(&failure.check.message);
            if let Some(error) = &failure.error {
                out.push_str(": ");
                out.push_str(error);
            }
            if let Some(actual) = &failure.actual {
                out.push_str(&format!(" (actual: {actual})"));
            }
        }
        out
    }
}
