//! Contract suite for the exam API.
//!
//! One mock backend on the canonical port serves all twelve scenarios;
//! every test is a plain `#[test]` talking to it over real HTTP. The
//! fixture is process-wide state with a defined lifecycle: started on
//! first use, held for the whole run, torn down with the process. No
//! other test binary may bind port 8082.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::OnceLock;

use examninja_harness::catalog::paths;
use examninja_harness::{ExamSuite, case_for};
use pretty_assertions::assert_eq;

/// Shared suite on the canonical port, started on first use.
///
/// The stub table is immutable once the server is up, so every scenario
/// can read from the same backend concurrently.
fn suite() -> &'static ExamSuite {
    static SUITE: OnceLock<ExamSuite> = OnceLock::new();
    SUITE.get_or_init(|| ExamSuite::start().expect("Failed to start the exam suite on port 8082"))
}

/// Runs the registered contract case for `path` and asserts every check.
fn assert_case(path: &str) {
    let case = case_for(path).expect("no contract case registered for path");
    let outcome = suite().check(&case).expect("Failed to fetch the endpoint");
    assert!(outcome.all_passed(), "{}", outcome.report());
}

// Scenario 1: starting a test shows its name and the first question.
#[test]
fn test_start_test_and_display_the_first_question() {
    assert_case(paths::START_TEST);

    let response = suite().get(paths::START_TEST).unwrap();
    let json = response.body_as_json().expect("body should be JSON");
    assert_eq!(json["options"].as_array().unwrap().len(), 4);
}

// Scenario 2: the Previous button is inactive on the first screen.
#[test]
fn test_deactivate_previous_button_on_first_screen() {
    assert_case(paths::CHECK_PREVIOUS_BUTTON);
}

// Scenario 3: name, date and time of the test are all shown.
#[test]
fn test_display_test_details() {
    assert_case(paths::TEST_DETAILS);

    let response = suite().get(paths::TEST_DETAILS).unwrap();
    let json = response.body_as_json().expect("body should be JSON");
    assert_eq!(json["testName"], "Java Certification Exam");
    assert_eq!(json["startDate"], "Oct 10, 2024");
    assert_eq!(json["time"], "9:00 AM");
}

// Scenario 4: a question is shown with its four options.
#[test]
fn test_display_question_with_four_options() {
    assert_case(paths::QUESTION_WITH_OPTIONS);

    let response = suite().get(paths::QUESTION_WITH_OPTIONS).unwrap();
    let json = response.body_as_json().expect("body should be JSON");
    assert_eq!(json["options"], serde_json::json!(["1", "2", "3", "4"]));
}

// Scenario 5: long questions come through in full.
#[test]
fn test_scroll_for_long_questions() {
    assert_case(paths::LONG_QUESTION);
}

// Scenario 6: the Next button is inactive on the last screen.
#[test]
fn test_deactivate_next_button_on_last_screen() {
    assert_case(paths::CHECK_NEXT_BUTTON);
}

// Scenario 7: Next and Previous move between questions.
#[test]
fn test_next_and_previous_button_navigation() {
    assert_case(paths::NAVIGATE_QUESTIONS);
}

// Scenario 8: navigation is backed by the backend.
#[test]
fn test_backend_integration_for_navigation() {
    assert_case(paths::BACKEND_NAVIGATION);
}

// Scenario 9: the test page URL is the canonical one.
#[test]
fn test_navigation_to_correct_test_page_url() {
    assert_case(paths::TEST_URL);

    let response = suite().get(paths::TEST_URL).unwrap();
    let json = response.body_as_json().expect("body should be JSON");
    assert_eq!(json["url"], "http://localhost:8082/testPage");
    assert_eq!(json["status"], "correct");
}

// Scenario 10: question content is visible and readable.
#[test]
fn test_visibility_and_readability_of_content() {
    assert_case(paths::CHECK_VISIBILITY);

    let response = suite().get(paths::CHECK_VISIBILITY).unwrap();
    let json = response.body_as_json().expect("body should be JSON");
    assert_eq!(json["visible"], true);
}

// Scenario 11: going back keeps previously given answers.
#[test]
fn test_back_navigation_with_data_retention() {
    assert_case(paths::BACK_NAVIGATION);

    let response = suite().get(paths::BACK_NAVIGATION).unwrap();
    let json = response.body_as_json().expect("body should be JSON");
    assert_eq!(json["answer1"], "Paris");
    assert_eq!(json["answer2"], "4");
}

// Scenario 12: an idle session times out.
#[test]
fn test_user_session_timeout() {
    assert_case(paths::SESSION_TIMEOUT);
}

#[test]
fn test_every_catalog_case_passes() {
    let outcomes = suite().check_all().expect("Failed to run the catalog");
    assert_eq!(outcomes.len(), 12);
    for outcome in outcomes {
        assert!(outcome.all_passed(), "{}", outcome.report());
    }
}

#[test]
fn test_unregistered_path_gets_404_diagnostic() {
    let response = suite().get("/api/unknown").unwrap();
    assert_eq!(response.status, 404);
    assert_eq!(response.body, "no stub registered for GET /api/unknown");

    // A miss never disturbs the registered endpoints.
    let response = suite().get(paths::START_TEST).unwrap();
    assert_eq!(response.status, 200);
}

#[test]
fn test_routing_is_exact() {
    for path in [
        "/api/startTest/",
        "/api/startTes",
        "/api/startTestExtra",
        "/api",
        "/",
    ] {
        let response = suite().get(path).unwrap();
        assert_eq!(response.status, 404, "{path} should not match any stub");
    }
}

#[test]
fn test_repeated_requests_are_idempotent() {
    let first = suite().get(paths::NAVIGATE_QUESTIONS).unwrap();
    for _ in 0..2 {
        let again = suite().get(paths::NAVIGATE_QUESTIONS).unwrap();
        assert_eq!(again.status, first.status);
        assert_eq!(again.body, first.body);
    }
    assert!(suite().server().hits(paths::NAVIGATE_QUESTIONS) >= 3);
}

#[test]
fn test_every_endpoint_serves_json() {
    for case in examninja_harness::contract_cases() {
        let response = suite().get(&case.path).unwrap();
        assert_eq!(response.status, 200, "{} should be stubbed", case.path);
        assert!(response.is_json(), "{} should declare JSON", case.path);
        assert!(
            response.body_as_json().is_some(),
            "{} body should parse as JSON",
            case.path
        );
    }
}

#[test]
fn test_every_endpoint_serves_its_registered_body() {
    let stubs = examninja_harness::exam_stubs();
    for case in examninja_harness::contract_cases() {
        let stub = stubs.get(&case.path).expect("every case has a stub");
        let response = suite().get(&case.path).unwrap();
        assert_eq!(
            response.status, stub.status,
            "{} should serve its registered status",
            case.path
        );
        assert_eq!(
            response.body, stub.body,
            "{} should serve its registered body byte for byte",
            case.path
        );
    }
}

#[test]
fn test_requests_are_recorded() {
    let before = suite().server().hits(paths::LONG_QUESTION);
    suite().get(paths::LONG_QUESTION).unwrap();

    assert!(suite().server().hits(paths::LONG_QUESTION) > before);
    assert!(
        suite()
            .server()
            .received_requests()
            .iter()
            .any(|r| r.method == "GET" && r.path == paths::LONG_QUESTION)
    );
}
