//! Stub registrations for the mock backend.
//!
//! A [`Stub`] is a fixed response bound to one exact request path; a
//! [`StubSet`] is the write-once table the mock server answers from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A pre-registered fixed response for a single request path.
///
/// Stubs are created during suite setup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stub {
    /// Exact request path this stub answers (e.g. `/api/startTest`).
    pub path: String,
    /// HTTP status code to return.
    pub status: u16,
    /// Response headers, in registration order.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    /// Fixed response body.
    #[serde(default)]
    pub body: String,
}

impl Stub {
    /// Creates a stub answering `path` with `200` and an empty body.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: 200,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Creates a `200` stub with `Content-Type: application/json` and the
    /// given body.
    #[must_use]
    pub fn json(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(path)
            .with_header("Content-Type", "application/json")
            .with_body(body)
    }

    /// Sets the response status code.
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Appends a response header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the response body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the first header value with the given name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn validate(&self) -> DomainResult<()> {
        if self.path.is_empty() || !self.path.starts_with('/') {
            return Err(DomainError::InvalidStubPath(self.path.clone()));
        }
        // Informational statuses cannot be delivered as a final response,
        // and 204/304 bodies are stripped on the wire.
        if !(200..=599).contains(&self.status) {
            return Err(DomainError::InvalidStatus(self.status));
        }
        if matches!(self.status, 204 | 304) && !self.body.is_empty() {
            return Err(DomainError::BodyNotAllowed(self.status));
        }
        for (name, value) in &self.headers {
            if name.is_empty() || !name.chars().all(is_header_name_char) {
                return Err(DomainError::InvalidHeaderName(name.clone()));
            }
            if value.chars().any(|c| c.is_control() && c != '\t') {
                return Err(DomainError::InvalidHeaderValue(name.clone()));
            }
        }
        Ok(())
    }
}

const fn is_header_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Write-once mapping of request paths to stubs.
///
/// Built during setup, then moved into the mock server and read-only for
/// the rest of the run; a path uniquely determines its response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubSet {
    stubs: BTreeMap<String, Stub>,
}

impl StubSet {
    /// Creates an empty stub set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stubs: BTreeMap::new(),
        }
    }

    /// Registers a stub, validating it first.
    ///
    /// # Errors
    ///
    /// Returns an error if a stub is already registered for the same path,
    /// or if the stub is malformed: bad path or header, a status outside
    /// `200..=599`, or a body on a bodiless status (`204`, `304`).
    pub fn register(&mut self, stub: Stub) -> DomainResult<()> {
        stub.validate()?;
        if self.stubs.contains_key(&stub.path) {
            return Err(DomainError::DuplicateStubPath(stub.path));
        }
        self.stubs.insert(stub.path.clone(), stub);
        Ok(())
    }

    /// Registers a stub (builder pattern).
    ///
    /// # Errors
    ///
    /// Same conditions as [`StubSet::register`].
    pub fn with_stub(mut self, stub: Stub) -> DomainResult<Self> {
        self.register(stub)?;
        Ok(self)
    }

    /// Returns the stub registered for an exact path, if any.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Stub> {
        self.stubs.get(path)
    }

    /// Returns true if a stub is registered for the exact path.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.stubs.contains_key(path)
    }

    /// Returns the number of registered stubs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stubs.len()
    }

    /// Returns true if no stubs are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stubs.is_empty()
    }

    /// Iterates over registered paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.stubs.keys().map(String::as_str)
    }

    /// Iterates over registered stubs in path order.
    pub fn iter(&self) -> impl Iterator<Item = &Stub> {
        self.stubs.values()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stub_defaults() {
        let stub = Stub::new("/api/ping");
        assert_eq!(stub.status, 200);
        assert!(stub.headers.is_empty());
        assert!(stub.body.is_empty());
    }

    #[test]
    fn test_json_stub_sets_content_type() {
        let stub = Stub::json("/api/ping", r#"{ "status": "ok" }"#);
        assert_eq!(stub.header("content-type"), Some("application/json"));
        assert_eq!(stub.body, r#"{ "status": "ok" }"#);
    }

    #[test]
    fn test_builder_chain() {
        let stub = Stub::new("/api/teapot")
            .with_status(418)
            .with_header("X-Kind", "teapot")
            .with_body("short and stout");
        assert_eq!(stub.status, 418);
        assert_eq!(stub.header("x-kind"), Some("teapot"));
        assert_eq!(stub.body, "short and stout");
    }

    #[test]
    fn test_register_and_exact_lookup() {
        let mut set = StubSet::new();
        set.register(Stub::json("/api/a", "{}")).unwrap();

        assert!(set.contains("/api/a"));
        assert!(set.get("/api/a").is_some());
        // Exact match only: no prefix or trailing-slash leniency.
        assert!(set.get("/api/a/").is_none());
        assert!(set.get("/api").is_none());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let mut set = StubSet::new();
        set.register(Stub::new("/api/a")).unwrap();
        let err = set.register(Stub::new("/api/a")).unwrap_err();
        assert_eq!(err, DomainError::DuplicateStubPath("/api/a".to_string()));
    }

    #[test]
    fn test_invalid_path_rejected() {
        let mut set = StubSet::new();
        assert_eq!(
            set.register(Stub::new("")).unwrap_err(),
            DomainError::InvalidStubPath(String::new())
        );
        assert_eq!(
            set.register(Stub::new("api/a")).unwrap_err(),
            DomainError::InvalidStubPath("api/a".to_string())
        );
    }

    #[test]
    fn test_invalid_status_rejected() {
        let mut set = StubSet::new();
        let err = set.register(Stub::new("/api/a").with_status(99)).unwrap_err();
        assert_eq!(err, DomainError::InvalidStatus(99));
        let err = set.register(Stub::new("/api/a").with_status(600)).unwrap_err();
        assert_eq!(err, DomainError::InvalidStatus(600));
    }

    #[test]
    fn test_informational_status_rejected() {
        // The backend only delivers final responses, so 1xx stubs never
        // enter the table.
        let mut set = StubSet::new();
        for status in [100, 101, 103, 199] {
            let err = set
                .register(Stub::new("/api/early").with_status(status))
                .unwrap_err();
            assert_eq!(err, DomainError::InvalidStatus(status));
        }
        assert!(set.is_empty());
    }

    #[test]
    fn test_body_on_bodiless_status_rejected() {
        let mut set = StubSet::new();
        for status in [204, 304] {
            let err = set
                .register(Stub::new("/api/empty").with_status(status).with_body("payload"))
                .unwrap_err();
            assert_eq!(err, DomainError::BodyNotAllowed(status));
        }
        // Without a body, those statuses register fine.
        set.register(Stub::new("/api/empty").with_status(204)).unwrap();
        assert!(set.contains("/api/empty"));
    }

    #[test]
    fn test_invalid_header_rejected() {
        let mut set = StubSet::new();
        let err = set
            .register(Stub::new("/api/a").with_header("Bad Name", "v"))
            .unwrap_err();
        assert_eq!(err, DomainError::InvalidHeaderName("Bad Name".to_string()));

        let err = set
            .register(Stub::new("/api/a").with_header("X-Ok", "line\nbreak"))
            .unwrap_err();
        assert_eq!(err, DomainError::InvalidHeaderValue("X-Ok".to_string()));
    }

    #[test]
    fn test_paths_are_sorted() {
        let set = StubSet::new()
            .with_stub(Stub::new("/b"))
            .unwrap()
            .with_stub(Stub::new("/a"))
            .unwrap();
        let paths: Vec<_> = set.paths().collect();
        assert_eq!(paths, vec!["/a", "/b"]);
    }
}
