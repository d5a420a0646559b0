//! Mock server lifecycle: bind, serve from a worker thread, graceful stop.

use std::net::{SocketAddr, TcpListener as StdTcpListener};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use thiserror::Error;
use tokio::sync::oneshot;

use examninja_domain::StubSet;

use super::router::{RecordedRequest, stub_router};

/// Errors raised while starting the mock server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The requested port could not be bound.
    ///
    /// The usual cause is another process (or another suite) already
    /// listening on the port; the run cannot continue.
    #[error("failed to bind 127.0.0.1:{port}: {source}")]
    Bind {
        /// Port the bind was attempted on.
        port: u16,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Listener, runtime or worker-thread setup failed after binding.
    #[error("failed to set up mock server: {0}")]
    Setup(#[from] std::io::Error),
}

/// A local HTTP server answering pre-registered stubs.
///
/// The server owns a dedicated worker thread running a single-threaded
/// runtime, so it keeps serving no matter which runtime (if any) the
/// calling test uses. [`MockServer::stop`] shuts it down and blocks until
/// the port is released; dropping the server does the same.
#[derive(Debug)]
pub struct MockServer {
    addr: SocketAddr,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown: Option<oneshot::Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl MockServer {
    /// Starts the server on `127.0.0.1:port` serving the given stubs.
    ///
    /// The stub table is fixed for the lifetime of the server. Pass port
    /// `0` to let the OS pick a free port.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] when the port is already taken and
    /// [`ServerError::Setup`] when the listener, runtime or worker thread
    /// cannot be set up.
    pub fn start(port: u16, stubs: StubSet) -> Result<Self, ServerError> {
        let listener = StdTcpListener::bind(("127.0.0.1", port))
            .map_err(|source| ServerError::Bind { port, source })?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        // Register the listener with this runtime's reactor before the
        // worker thread takes over.
        let listener = runtime.block_on(async { tokio::net::TcpListener::from_std(listener) })?;

        let log = Arc::new(Mutex::new(Vec::new()));
        let router = stub_router(Arc::new(stubs), Arc::clone(&log));
        let (shutdown, signal) = oneshot::channel::<()>();

        let worker = std::thread::Builder::new()
            .name(format!("mock-server-{}", addr.port()))
            .spawn(move || {
                runtime.block_on(async move {
                    let shutdown = async move {
                        let _ = signal.await;
                    };
                    match axum::serve(listener, router)
                        .with_graceful_shutdown(shutdown)
                        .await
                    {
                        Ok(()) => tracing::debug!(%addr, "mock server stopped"),
                        Err(error) => {
                            tracing::error!(%addr, %error, "mock server terminated abnormally");
                        }
                    }
                });
            })?;

        tracing::info!(%addr, "mock server listening");
        Ok(Self {
            addr,
            log,
            shutdown: Some(shutdown),
            worker: Some(worker),
        })
    }

    /// Local address the server is bound to.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Port the server is bound to.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Base URL of the server, e.g. `http://127.0.0.1:8082`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Returns true while the worker thread is alive.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Every request the server has observed so far, in arrival order.
    #[must_use]
    pub fn received_requests(&self) -> Vec<RecordedRequest> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of observed requests for the exact path.
    #[must_use]
    pub fn hits(&self, path: &str) -> usize {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|request| request.path == path)
            .count()
    }

    /// Stops the server and blocks until the port is released.
    ///
    /// Calling `stop` more than once is harmless.
    pub fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("mock server worker panicked during shutdown");
            }
        }
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.stop();
    }
}
