//! HTTP front end: one POST body in, one plain-text answer out.
//!
//! Requests are parsed by `tiny_http`, which runs its own blocking accept loop. A dedicated
//! thread forwards each request to the async side, where bodies are read and answers written
//! on the blocking pool.

use super::auth::TokenSource;
use super::error::WorkerError;
use super::exec::execute;
use super::request::WorkerRequest;
use std::io::{self, Read};
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use std::thread;
use tiny_http::{Request, Response, Server};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// Body of every response to a request whose command was attempted.
pub const EXECUTION_COMPLETED: &str = "Execution Completed";

/// Requests accepted but not yet picked up by the async side.
const PENDING_REQUESTS: usize = 64;

/// Status code and plain-text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn bad_request(body: impl Into<String>) -> Self {
        Self {
            status: 400,
            body: body.into(),
        }
    }

    pub fn internal_error(body: impl Into<String>) -> Self {
        Self {
            status: 500,
            body: body.into(),
        }
    }
}

/// Executes posted commands with a token from `T`.
pub struct Worker<T> {
    tokens: T,
}

impl<T: TokenSource> Worker<T> {
    pub fn new(tokens: T) -> Self {
        Self { tokens }
    }

    /// Answer one request body.
    ///
    /// The command's own success or failure never changes the answer; it is only logged.
    pub async fn handle_request(&self, body: &[u8]) -> HttpResponse {
        let request = match WorkerRequest::from_json(body) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Rejecting request");
                return HttpResponse::bad_request(e.to_string());
            }
        };
        info!(command = %request.command, resource = %request.resource, "Received request");

        let token = match self.tokens.token().await {
            Ok(token) => token,
            Err(e) => {
                error!(error = %e, "Token unavailable");
                return HttpResponse::internal_error(e.to_string());
            }
        };

        match execute(&request, &token).await {
            Ok(outcome) => {
                info!(code = ?outcome.code, output = %outcome.output, "Execution completed");
            }
            Err(e) => {
                warn!(error = %e, "Error executing command");
            }
        }
        HttpResponse::ok(EXECUTION_COMPLETED)
    }
}

/// A bound HTTP listener.
pub struct WorkerServer {
    server: Arc<Server>,
}

impl WorkerServer {
    pub fn bind(addr: impl ToSocketAddrs) -> Result<Self, WorkerError> {
        let server = Server::http(addr).map_err(|e| WorkerError::Bind(e.to_string()))?;
        Ok(Self {
            server: Arc::new(server),
        })
    }

    /// Bound address; useful after binding port 0.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Answer requests until `cancel` fires. Each request is handled on its own task.
    #[instrument(skip_all, fields(addr = ?self.local_addr()))]
    pub async fn serve<T: TokenSource + 'static>(
        self,
        worker: Arc<Worker<T>>,
        cancel: CancellationToken,
    ) -> Result<(), WorkerError> {
        let (tx, mut rx) = mpsc::channel::<Request>(PENDING_REQUESTS);
        let server = Arc::clone(&self.server);
        let stopping = cancel.clone();
        thread::spawn(move || loop {
            match server.recv() {
                Ok(request) => {
                    if tx.blocking_send(request).is_err() {
                        break;
                    }
                }
                Err(_) if stopping.is_cancelled() || tx.is_closed() => break,
                Err(e) => error!(error = %e, "Failed to accept connection"),
            }
        });

        info!("Listening");
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                received = rx.recv() => {
                    let Some(request) = received else { break };
                    debug!(method = %request.method(), url = %request.url(), "Accepted");
                    let worker = Arc::clone(&worker);
                    tokio::spawn(async move {
                        if let Err(e) = handle(&worker, request).await {
                            warn!(error = %e, "Request failed");
                        }
                    });
                }
            }
        }

        info!("Stopping");
        self.server.unblock();
        Ok(())
    }
}

async fn handle<T: TokenSource>(worker: &Worker<T>, request: Request) -> Result<(), WorkerError> {
    let (request, body) = blocking(move || {
        let mut request = request;
        let mut body = Vec::new();
        let read = request.as_reader().read_to_end(&mut body).map(|_| body);
        (request, read)
    })
    .await?;

    let response = match body {
        Ok(body) => worker.handle_request(&body).await,
        Err(e) => HttpResponse::bad_request(e.to_string()),
    };
    let reply = Response::from_string(response.body).with_status_code(response.status);
    blocking(move || request.respond(reply)).await??;
    Ok(())
}

async fn blocking<F, R>(f: F) -> Result<R, WorkerError>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| WorkerError::Io(io::Error::other(format!("task panicked: {e}"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_a_taken_port_fails() {
        let first = WorkerServer::bind("127.0.0.1:0").unwrap();
        let addr = first.local_addr().unwrap();
        assert!(matches!(WorkerServer::bind(addr), Err(WorkerError::Bind(_))));
    }

    #[test]
    fn responses_carry_their_status() {
        assert_eq!(HttpResponse::ok(EXECUTION_COMPLETED).status, 200);
        assert_eq!(HttpResponse::bad_request("x").status, 400);
        assert_eq!(HttpResponse::internal_error("x").status, 500);
    }
}
