//! Built-in catalog of the exam API: stubbed endpoints and their contract
//! cases.
//!
//! The catalog is the single source of truth shared by the mock backend
//! (which serves the stubs) and the scenario suite (which runs the cases),
//! so the two can never drift apart.

use crate::contract::{Check, ContractCase};
use crate::error::DomainResult;
use crate::stub::{Stub, StubSet};

/// Local TCP port the mock exam backend binds by default.
pub const DEFAULT_MOCK_PORT: u16 = 8082;

/// Exact request paths served by the mock exam backend.
pub mod paths {
    /// Start a test and fetch the first question.
    pub const START_TEST: &str = "/api/startTest";
    /// State of the Previous button on the first screen.
    pub const CHECK_PREVIOUS_BUTTON: &str = "/api/checkPreviousButton";
    /// Test name, date and time details.
    pub const TEST_DETAILS: &str = "/api/testDetails";
    /// A question with its four answer options.
    pub const QUESTION_WITH_OPTIONS: &str = "/api/questionWithOptions";
    /// A question long enough to require scrolling.
    pub const LONG_QUESTION: &str = "/api/longQuestion";
    /// State of the Next button on the last screen.
    pub const CHECK_NEXT_BUTTON: &str = "/api/checkNextButton";
    /// Navigation between questions.
    pub const NAVIGATE_QUESTIONS: &str = "/api/navigateQuestions";
    /// Backend integration status for navigation.
    pub const BACKEND_NAVIGATION: &str = "/api/backendNavigation";
    /// Canonical test page URL.
    pub const TEST_URL: &str = "/api/testURL";
    /// Content visibility details.
    pub const CHECK_VISIBILITY: &str = "/api/checkVisibility";
    /// Answers retained after backwards navigation.
    pub const BACK_NAVIGATION: &str = "/api/backNavigation";
    /// Session timeout status.
    pub const SESSION_TIMEOUT: &str = "/api/sessionTimeout";
}

fn stub_entries() -> Vec<Stub> {
    vec![
        Stub::json(
            paths::START_TEST,
            r#"{ "testName": "Java Certification Exam", "startDate": "Oct 10, 2024", "time": "9:00 AM", "firstQuestion": "Which of the following are valid Java identifiers?", "options": ["_myVar", "123abc", "$value", "void"] }"#,
        ),
        Stub::json(
            paths::CHECK_PREVIOUS_BUTTON,
            r#"{ "status": "disabled" }"#,
        ),
        Stub::json(
            paths::TEST_DETAILS,
            r#"{ "testName": "Java Certification Exam", "startDate": "Oct 10, 2024", "time": "9:00 AM" }"#,
        ),
        Stub::json(
            paths::QUESTION_WITH_OPTIONS,
            r#"{ "question": "What is 2 + 2?", "options": ["1", "2", "3", "4"] }"#,
        ),
        Stub::json(
            paths::LONG_QUESTION,
            r#"{ "question": "A very long question that requires scrolling to view the full content...", "options": ["Option1", "Option2", "Option3", "Option4"] }"#,
        ),
        Stub::json(paths::CHECK_NEXT_BUTTON, r#"{ "status": "disabled" }"#),
        Stub::json(paths::NAVIGATE_QUESTIONS, r#"{ "status": "navigated" }"#),
        Stub::json(
            paths::BACKEND_NAVIGATION,
            r#"{ "status": "backend integrated" }"#,
        ),
        Stub::json(
            paths::TEST_URL,
            r#"{ "url": "http://localhost:8082/testPage", "status": "correct" }"#,
        ),
        Stub::json(
            paths::CHECK_VISIBILITY,
            r#"{ "question": "What is the capital of France?", "options": ["Berlin", "Madrid", "Paris", "Rome"], "visible": true }"#,
        ),
        Stub::json(
            paths::BACK_NAVIGATION,
            r#"{ "answer1": "Paris", "answer2": "4", "status": "answers retained" }"#,
        ),
        Stub::json(
            paths::SESSION_TIMEOUT,
            r#"{ "status": "session timed out" }"#,
        ),
    ]
}

fn register_all(entries: Vec<Stub>) -> DomainResult<StubSet> {
    let mut set = StubSet::new();
    for stub in entries {
        set.register(stub)?;
    }
    Ok(set)
}

/// Returns the stub set for all twelve exam API endpoints.
///
/// # Panics
///
/// Panics if the built-in catalog is internally inconsistent; the catalog
/// unit tests cover every entry.
#[must_use]
pub fn exam_stubs() -> StubSet {
    register_all(stub_entries()).expect("built-in exam catalog is valid")
}

/// Returns the contract cases for the exam API, in scenario order.
#[must_use]
pub fn contract_cases() -> Vec<ContractCase> {
    vec![
        ContractCase::new("Start test and display the first question", paths::START_TEST)
            .with_check(Check::body_contains(
                "Java Certification Exam",
                "Test name should be 'Java Certification Exam'",
            ))
            .with_check(Check::body_contains(
                "Which of the following are valid Java identifiers?",
                "First question should be displayed",
            )),
        ContractCase::new(
            "Deactivate Previous button on first screen",
            paths::CHECK_PREVIOUS_BUTTON,
        )
        .with_check(Check::body_contains(
            "disabled",
            "Previous button should be disabled on the first screen",
        )),
        ContractCase::new("Display test details", paths::TEST_DETAILS)
            .with_check(Check::body_contains(
                "Java Certification Exam",
                "Test name should be displayed",
            ))
            .with_check(Check::body_contains(
                "Oct 10, 2024",
                "Test date should be displayed",
            )),
        ContractCase::new(
            "Display question with 4 options and radio buttons",
            paths::QUESTION_WITH_OPTIONS,
        )
        .with_check(Check::body_contains(
            "What is 2 + 2?",
            "Question should be displayed",
        ))
        .with_check(Check::body_contains(
            "4",
            "Options should be displayed correctly",
        )),
        ContractCase::new("Scroll for long questions", paths::LONG_QUESTION).with_check(
            Check::body_contains(
                "A very long question",
                "Long question should be displayed",
            ),
        ),
        ContractCase::new(
            "Deactivate NEXT button on last screen",
            paths::CHECK_NEXT_BUTTON,
        )
        .with_check(Check::body_contains(
            "disabled",
            "Next button should be disabled on the last screen",
        )),
        ContractCase::new(
            "NEXT and PREVIOUS button navigation",
            paths::NAVIGATE_QUESTIONS,
        )
        .with_check(Check::body_contains(
            "navigated",
            "Buttons should navigate between questions",
        )),
        ContractCase::new(
            "Backend integration for navigation",
            paths::BACKEND_NAVIGATION,
        )
        .with_check(Check::body_contains(
            "backend integrated",
            "Backend should be integrated",
        )),
        ContractCase::new(
            "Verify navigation to correct test page (Test URL)",
            paths::TEST_URL,
        )
        .with_check(Check::body_contains(
            "http://localhost:8082/testPage",
            "Correct test page URL should be displayed",
        )),
        ContractCase::new(
            "Verify visibility and readability of content",
            paths::CHECK_VISIBILITY,
        )
        .with_check(Check::body_contains(
            "What is the capital of France?",
            "Question should be visible and readable",
        )),
        ContractCase::new(
            "Verify back navigation with data retention",
            paths::BACK_NAVIGATION,
        )
        .with_check(Check::body_contains(
            "answers retained",
            "Back navigation should retain answers",
        )),
        ContractCase::new("Verify user session timeout", paths::SESSION_TIMEOUT).with_check(
            Check::body_contains(
                "session timed out",
                "Session should time out after inactivity",
            ),
        ),
    ]
}

/// Looks up the contract case for an exact request path.
#[must_use]
pub fn case_for(path: &str) -> Option<ContractCase> {
    contract_cases().into_iter().find(|case| case.path == path)
}
