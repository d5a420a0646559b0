//! Contract runner implementation.
//!
//! Evaluates contract checks against HTTP responses and produces per-case
//! outcomes.

use examninja_domain::{CaseOutcome, Check, CheckResult, ContractCase, Expectation, ResponseSpec};

/// Longest body excerpt carried in a failure report.
const PREVIEW_LIMIT: usize = 100;

/// Runner that evaluates contract checks against responses.
#[derive(Debug, Default)]
pub struct ContractRunner {
    /// Whether to stop a case on its first failed check.
    stop_on_failure: bool,
}

impl ContractRunner {
    /// Creates a new contract runner.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stop_on_failure: false,
        }
    }

    /// Sets whether to stop a case on its first failed check.
    #[must_use]
    pub const fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    /// Runs every check of a case against a response.
    ///
    /// A failed check never aborts the run (unless configured to); later
    /// checks of the same case still get evaluated and reported.
    #[must_use]
    pub fn run(&self, case: &ContractCase, response: &ResponseSpec) -> CaseOutcome {
        let mut results = Vec::with_capacity(case.checks.len());

        for check in &case.checks {
            let result = self.run_check(check, response);
            let failed = !result.passed;
            results.push(result);

            if failed && self.stop_on_failure {
                break;
            }
        }

        let outcome = CaseOutcome::new(case, results);
        if outcome.all_passed() {
            tracing::debug!(case = %outcome.case_name, checks = outcome.total, "case passed");
        } else {
            tracing::warn!(case = %outcome.case_name, failed = outcome.failed, "case failed");
        }
        outcome
    }

    /// Evaluates a single check against a response.
    #[must_use]
    pub fn run_check(&self, check: &Check, response: &ResponseSpec) -> CheckResult {
        match &check.expectation {
            Expectation::StatusIs { expected } => self.check_status(check, response, *expected),
            Expectation::BodyContains { needle } => {
                self.check_body_contains(check, response, needle)
            }
            Expectation::BodyEquals { expected } => {
                self.check_body_equals(check, response, expected)
            }
            Expectation::BodyIsJson => self.check_body_is_json(check, response),
            Expectation::ContentTypeContains { expected } => {
                self.check_content_type(check, response, expected)
            }
        }
    }

    fn check_status(&self, check: &Check, response: &ResponseSpec, expected: u16) -> CheckResult {
        let actual = response.status;
        if actual == expected {
            CheckResult::pass_with_value(check.clone(), actual.to_string())
        } else {
            CheckResult::fail_with_value(
                check.clone(),
                format!("expected status {expected}, got {actual}"),
                actual.to_string(),
            )
        }
    }

    fn check_body_contains(
        &self,
        check: &Check,
        response: &ResponseSpec,
        needle: &str,
    ) -> CheckResult {
        if response.body.contains(needle) {
            CheckResult::pass(check.clone())
        } else {
            CheckResult::fail_with_value(
                check.clone(),
                format!("body does not contain {needle:?}"),
                preview(&response.body),
            )
        }
    }

    fn check_body_equals(
        &self,
        check: &Check,
        response: &ResponseSpec,
        expected: &str,
    ) -> CheckResult {
        if response.body == expected {
            CheckResult::pass(check.clone())
        } else {
            CheckResult::fail_with_value(
                check.clone(),
                "body does not equal the expected text",
                preview(&response.body),
            )
        }
    }

    fn check_body_is_json(&self, check: &Check, response: &ResponseSpec) -> CheckResult {
        match serde_json::from_str::<serde_json::Value>(&response.body) {
            Ok(_) => CheckResult::pass(check.clone()),
            Err(e) => CheckResult::fail_with_value(
                check.clone(),
                format!("body is not valid JSON: {e}"),
                preview(&response.body),
            ),
        }
    }

    fn check_content_type(
        &self,
        check: &Check,
        response: &ResponseSpec,
        expected: &str,
    ) -> CheckResult {
        match response.content_type() {
            Some(actual) => {
                if actual.contains(expected) {
                    CheckResult::pass_with_value(check.clone(), actual.clone())
                } else {
                    CheckResult::fail_with_value(
                        check.clone(),
                        format!("Content-Type {actual:?} does not contain {expected:?}"),
                        actual.clone(),
                    )
                }
            }
            None => CheckResult::fail(check.clone(), "no Content-Type header present"),
        }
    }
}

/// Truncates a body for failure reports without splitting a UTF-8
/// character.
fn preview(body: &str) -> String {
    if body.len() <= PREVIEW_LIMIT {
        body.to_string()
    } else {
        let cut = (0..=PREVIEW_LIMIT)
            .rev()
            .find(|&i| body.is_char_boundary(i))
            .unwrap_or(0);
        format!("{}...", &body[..cut])
    }
}
