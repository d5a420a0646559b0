//! HTTP adapters.
//!
//! This module provides the blocking client the contract scenarios use to
//! drive the mock backend.

mod api_client;

pub use api_client::{ApiClient, ClientError};
