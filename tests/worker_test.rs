use apg_registry::worker::{
    HttpResponse, MetadataTokenSource, StaticTokenSource, TokenSource, Worker, WorkerError,
    WorkerServer, EXECUTION_COMPLETED,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;

struct NoToken;

#[async_trait]
impl TokenSource for NoToken {
    async fn token(&self) -> Result<String, WorkerError> {
        Err(WorkerError::Token("metadata server unreachable".into()))
    }
}

fn body(command: &str, resource: &str) -> Vec<u8> {
    serde_json::json!({ "command": command, "resource": resource })
        .to_string()
        .into_bytes()
}

#[tokio::test]
async fn test_command_is_executed_and_acknowledged() {
    let worker = Worker::new(StaticTokenSource("token".into()));
    let response = worker.handle_request(&body("echo lint", "projects/p")).await;
    assert_eq!(response, HttpResponse::ok(EXECUTION_COMPLETED));
}

#[tokio::test]
async fn test_failing_command_is_still_acknowledged() {
    let worker = Worker::new(StaticTokenSource("token".into()));

    let failed = worker.handle_request(&body("false", "projects/p")).await;
    assert_eq!(failed.status, 200);

    let missing = worker
        .handle_request(&body("no-such-program-anywhere", "projects/p"))
        .await;
    assert_eq!(missing.status, 200);
    assert_eq!(missing.body, EXECUTION_COMPLETED);
}

#[tokio::test]
async fn test_undecodable_body_is_rejected() {
    let worker = Worker::new(StaticTokenSource("token".into()));
    let response = worker.handle_request(b"{not json").await;
    assert_eq!(response.status, 400);
    assert!(!response.body.is_empty());
}

#[tokio::test]
async fn test_missing_token_is_a_server_error() {
    let worker = Worker::new(NoToken);
    let response = worker.handle_request(&body("echo lint", "projects/p")).await;
    assert_eq!(response.status, 500);
    assert!(response.body.contains("metadata server unreachable"));
}

async fn send(addr: std::net::SocketAddr, raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

async fn post(addr: std::net::SocketAddr, payload: &[u8]) -> String {
    let mut raw = format!(
        "POST / HTTP/1.1\r\nHost: worker\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        payload.len()
    )
    .into_bytes();
    raw.extend_from_slice(payload);
    send(addr, &raw).await
}

/// Body sent in two chunks, no `Content-Length`.
async fn post_chunked(addr: std::net::SocketAddr, payload: &[u8]) -> String {
    let (head, tail) = payload.split_at(payload.len() / 2);
    let mut raw = b"POST / HTTP/1.1\r\nHost: worker\r\nContent-Type: application/json\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n".to_vec();
    for chunk in [head, tail] {
        raw.extend_from_slice(format!("{:x}\r\n", chunk.len()).as_bytes());
        raw.extend_from_slice(chunk);
        raw.extend_from_slice(b"\r\n");
    }
    raw.extend_from_slice(b"0\r\n\r\n");
    send(addr, &raw).await
}

async fn start_server() -> (
    std::net::SocketAddr,
    CancellationToken,
    tokio::task::JoinHandle<Result<(), WorkerError>>,
) {
    let server = WorkerServer::bind("127.0.0.1:0").unwrap();
    let addr = server.local_addr().unwrap();
    let worker = Arc::new(Worker::new(StaticTokenSource("token".into())));
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(server.serve(worker, cancel.clone()));
    (addr, cancel, handle)
}

/// Real listener, real sockets.
#[tokio::test]
async fn test_server_answers_over_http() {
    let (addr, cancel, server) = start_server().await;

    let ok = post(addr, &body("echo lint", "projects/p")).await;
    assert!(ok.starts_with("HTTP/1.1 200 OK\r\n"), "{ok}");
    assert!(ok.ends_with(EXECUTION_COMPLETED));

    let bad = post(addr, b"[]").await;
    assert!(bad.starts_with("HTTP/1.1 400 Bad Request\r\n"), "{bad}");

    cancel.cancel();
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_server_accepts_chunked_bodies() {
    let (addr, cancel, server) = start_server().await;

    let response = post_chunked(addr, &body("echo hi", "projects/p")).await;
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "{response}");
    assert!(response.ends_with(EXECUTION_COMPLETED));

    cancel.cancel();
    server.await.unwrap().unwrap();
}

/// Metadata server stand-in that checks the request and hands out a fixed token.
async fn fake_metadata_server() -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let host = listener.local_addr().unwrap().to_string();
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buffer = vec![0; 4096];
        let mut request = String::new();
        while !request.contains("\r\n\r\n") {
            let n = stream.read(&mut buffer).await.unwrap();
            if n == 0 {
                break;
            }
            request.push_str(&String::from_utf8_lossy(&buffer[..n]));
        }
        let token = "id-token";
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{token}",
            token.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        request
    });
    (host, handle)
}

#[tokio::test]
async fn test_metadata_token_source() {
    let (host, server) = fake_metadata_server().await;
    let source = MetadataTokenSource::new(&host, "registry:8080").unwrap();

    assert_eq!(source.token().await.unwrap(), "id-token");

    let request = server.await.unwrap().to_lowercase();
    assert!(request.starts_with(
        "get /computemetadata/v1/instance/service-accounts/default/identity?audience=http://registry:8080 "
    ));
    assert!(request.contains("metadata-flavor: google"));
}

#[tokio::test]
async fn test_unreachable_metadata_server() {
    // Bind then drop, so the port is very likely closed.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let host = listener.local_addr().unwrap().to_string();
    drop(listener);

    let source = MetadataTokenSource::new(&host, "registry:8080").unwrap();
    let result = source.token().await;
    assert!(matches!(result, Err(WorkerError::Token(_))));
}
