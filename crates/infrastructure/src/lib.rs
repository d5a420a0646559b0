//! ExamNinja Infrastructure - Mock backend and HTTP adapters
//!
//! This crate provides the concrete I/O pieces of the contract-test
//! harness: the stub-serving mock backend and the blocking HTTP client
//! the scenarios drive it with.

pub mod adapters;
pub mod mock;
pub mod testing;

pub use adapters::{ApiClient, ClientError};
pub use mock::{MockServer, RecordedRequest, ServerError};
pub use testing::ContractRunner;
