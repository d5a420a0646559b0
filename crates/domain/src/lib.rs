//! ExamNinja Domain - Core harness types
//!
//! This crate defines the domain model for the ExamNinja contract-test
//! harness. All types here are pure Rust with no I/O dependencies.

pub mod catalog;
pub mod contract;
pub mod error;
pub mod response;
pub mod stub;

pub use catalog::{DEFAULT_MOCK_PORT, case_for, contract_cases, exam_stubs};
pub use contract::{CaseOutcome, Check, CheckResult, ContractCase, Expectation};
pub use error::{DomainError, DomainResult};
pub use response::ResponseSpec;
pub use stub::{Stub, StubSet};
