//! Stub-serving mock backend.
//!
//! This module provides the local HTTP server that answers pre-registered
//! stubs during a contract-test run.

mod backend;
mod router;

pub use backend::{MockServer, ServerError};
pub use router::RecordedRequest;
