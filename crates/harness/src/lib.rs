//! ExamNinja Harness - Contract suites against the mock backend
//!
//! This crate ties the pieces together: it starts the stub-serving mock
//! backend, hands out a blocking client pointed at it, and runs contract
//! cases end to end. A suite is an explicit value with an explicit
//! lifecycle; there are no hidden set-up or tear-down hooks.

use std::sync::Once;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use examninja_domain::catalog;
pub use examninja_domain::{
    CaseOutcome, Check, CheckResult, ContractCase, DEFAULT_MOCK_PORT, Expectation, ResponseSpec,
    Stub, StubSet, case_for, contract_cases, exam_stubs,
};
pub use examninja_infrastructure::{
    ApiClient, ClientError, ContractRunner, MockServer, RecordedRequest, ServerError,
};

static INIT_LOGGING: Once = Once::new();

/// Installs the process-wide tracing subscriber.
///
/// Filtering follows `RUST_LOG` and defaults to `info` when unset. Repeat
/// calls are no-ops, so every suite calls it unconditionally.
pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}

/// Errors raised while setting up or driving a suite.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// The mock server could not be started.
    #[error("mock server error: {0}")]
    Server(#[from] ServerError),
    /// The HTTP client could not be built or the request failed.
    #[error("http client error: {0}")]
    Client(#[from] ClientError),
}

/// A running contract-test fixture: one mock backend plus one client.
///
/// Tests either create a suite per case (usually on an ephemeral port) or
/// share one suite per process bound to [`DEFAULT_MOCK_PORT`]. Either way
/// the scope is visible in the code that uses it: the suite lives exactly
/// as long as the value does, and [`ExamSuite::shutdown`] (or dropping
/// the suite) frees the port.
#[derive(Debug)]
pub struct ExamSuite {
    server: MockServer,
    client: ApiClient,
    runner: ContractRunner,
}

impl ExamSuite {
    /// Starts a suite on [`DEFAULT_MOCK_PORT`] with the built-in exam
    /// catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::Server`] when the port cannot be bound and
    /// [`SuiteError::Client`] when the HTTP client cannot be built.
    pub fn start() -> Result<Self, SuiteError> {
        Self::start_on(DEFAULT_MOCK_PORT, exam_stubs())
    }

    /// Starts a suite on the given port with the given stubs.
    ///
    /// Pass port `0` to let the OS pick a free port.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ExamSuite::start`].
    pub fn start_on(port: u16, stubs: StubSet) -> Result<Self, SuiteError> {
        init_logging();
        let server = MockServer::start(port, stubs)?;
        let client = ApiClient::new()?;

        tracing::info!(base_url = %server.base_url(), "suite started");
        Ok(Self {
            server,
            client,
            runner: ContractRunner::new(),
        })
    }

    /// The mock server behind this suite.
    #[must_use]
    pub const fn server(&self) -> &MockServer {
        &self.server
    }

    /// The blocking client pointed at this suite's server.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Base URL of the suite's mock server.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.server.base_url()
    }

    /// Issues a GET against the suite's server.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::Client`] on transport or decoding failures.
    /// HTTP error statuses are responses, not errors.
    pub fn get(&self, path: &str) -> Result<ResponseSpec, SuiteError> {
        Ok(self.client.get(&self.server.base_url(), path)?)
    }

    /// Runs one contract case end to end and returns its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::Client`] when the request itself fails; check
    /// failures are reported in the outcome, not as errors.
    pub fn check(&self, case: &ContractCase) -> Result<CaseOutcome, SuiteError> {
        let response = self.get(&case.path)?;
        Ok(self.runner.run(case, &response))
    }

    /// Runs every case in the built-in catalog, in scenario order.
    ///
    /// # Errors
    ///
    /// Returns the first request failure; outcomes of earlier cases are
    /// discarded in that event.
    pub fn check_all(&self) -> Result<Vec<CaseOutcome>, SuiteError> {
        contract_cases()
            .iter()
            .map(|case| self.check(case))
            .collect()
    }

    /// Stops the mock server and releases its port.
    ///
    /// Dropping the suite has the same effect; this form just makes the
    /// teardown point explicit.
    pub fn shutdown(mut self) {
        self.server.stop();
    }
}
