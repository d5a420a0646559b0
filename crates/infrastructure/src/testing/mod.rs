//! Response checking infrastructure.
//!
//! This module provides the runner that evaluates contract checks against
//! HTTP responses.

mod runner;

pub use runner::ContractRunner;
