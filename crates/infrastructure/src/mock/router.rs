//! Axum router serving registered stubs with exact-path matching.

use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Response, StatusCode, Uri, header};
use axum::response::IntoResponse;
use tower_http::trace::TraceLayer;

use examninja_domain::{Stub, StubSet};

/// One request observed by the mock backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Request method (e.g. `GET`).
    pub method: String,
    /// Request path including any query string.
    pub path: String,
    /// Whether a stub answered the request.
    pub matched: bool,
}

#[derive(Clone)]
struct AppState {
    stubs: Arc<StubSet>,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl AppState {
    fn record(&self, method: &Method, path: &str, matched: bool) {
        let mut log = self.log.lock().unwrap_or_else(PoisonError::into_inner);
        log.push(RecordedRequest {
            method: method.to_string(),
            path: path.to_string(),
            matched,
        });
    }
}

/// Builds the router answering the given stubs and recording every request.
pub(crate) fn stub_router(stubs: Arc<StubSet>, log: Arc<Mutex<Vec<RecordedRequest>>>) -> Router {
    Router::new()
        .fallback(serve_stub)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { stubs, log })
}

/// Answers a request from the stub table.
///
/// The lookup key is the full path-and-query, so `/api/startTest?x=1` does
/// not match a stub registered for `/api/startTest`. Only GET requests are
/// matched; anything else gets the 404 diagnostic.
async fn serve_stub(State(state): State<AppState>, method: Method, uri: Uri) -> Response<Body> {
    let path = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());

    let stub = if method == Method::GET {
        state.stubs.get(&path)
    } else {
        None
    };
    state.record(&method, &path, stub.is_some());

    match stub {
        Some(stub) => {
            tracing::debug!(%path, status = stub.status, "serving stub");
            stub_response(stub)
        }
        None => {
            tracing::debug!(%method, %path, "no stub registered");
            not_found(&method, &path)
        }
    }
}

fn stub_response(stub: &Stub) -> Response<Body> {
    let status = StatusCode::from_u16(stub.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = Response::builder().status(status);
    for (name, value) in &stub.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
        .body(Body::from(stub.body.clone()))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn not_found(method: &Method, path: &str) -> Response<Body> {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("no stub registered for {method} {path}"),
    )
        .into_response()
}
